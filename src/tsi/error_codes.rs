use crate::domain::outcome::FailureCause;

pub const DEFAULT_FAILURE_CAUSE: FailureCause = FailureCause::PaymentPartnerError;

/// Non-OK `status` values of the initiation response.
const GO_CODES: &[(i32, FailureCause)] = &[
    (0, FailureCause::PaymentPartnerError),
    (2, FailureCause::InvalidData),
    (3, FailureCause::InvalidData),
    (4, FailureCause::InvalidData),
    (5, FailureCause::InvalidData),
    (6, FailureCause::PaymentPartnerError),
    (9, FailureCause::InternalError),
];

/// `code` values of the status-check response.
const STATUS_CHECK_CODES: &[(i32, FailureCause)] = &[
    (1, FailureCause::PaymentPartnerError),
    (101, FailureCause::InvalidData),
    (102, FailureCause::InvalidData),
    (103, FailureCause::InvalidData),
    (104, FailureCause::InvalidData),
    (105, FailureCause::InvalidData),
    (106, FailureCause::PaymentPartnerError),
    (107, FailureCause::PaymentPartnerError),
];

pub fn go_failure_cause(status: i32) -> FailureCause {
    lookup(GO_CODES, status)
}

pub fn status_check_failure_cause(code: i32) -> FailureCause {
    lookup(STATUS_CHECK_CODES, code)
}

fn lookup(table: &[(i32, FailureCause)], code: i32) -> FailureCause {
    table
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, cause)| *cause)
        .unwrap_or(DEFAULT_FAILURE_CAUSE)
}
