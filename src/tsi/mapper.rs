use crate::domain::outcome::{FailureCause, PaymentOutcome};
use crate::error::Result;
use crate::flow::ports::OutcomeMapper;
use crate::transport::RawHttpResponse;
use crate::tsi::error_codes::{go_failure_cause, status_check_failure_cause, DEFAULT_FAILURE_CAUSE};
use crate::tsi::response::{
    parse, CheckStatus, GoResponse, PartnerResult, StatusCheckResponse, GO_STATUS_OK,
    STATUS_CHECK_CODE_OK,
};

const NO_CONTENT_MESSAGE: &str = "partner returned no content";
const NOT_FOUND_MESSAGE: &str = "transaction not found";

/// Initiation answer to an outcome. `transaction_id` is the one we sent.
pub fn classify_go(result: &PartnerResult<GoResponse>, transaction_id: &str) -> PaymentOutcome {
    let go = match result {
        PartnerResult::NoContent => {
            return PaymentOutcome::failure(FailureCause::InternalError, NO_CONTENT_MESSAGE, transaction_id)
        }
        PartnerResult::Content(go) => go,
    };
    let message = go.message.clone().unwrap_or_default();

    match go.status {
        Some(GO_STATUS_OK) => match go.url.as_deref().and_then(redirect_url) {
            Some(url) => PaymentOutcome::RedirectTo {
                url,
                transaction_id: echoed(go.tid.as_deref(), transaction_id),
            },
            None => PaymentOutcome::failure(
                FailureCause::InternalError,
                "partner accepted the payment without a usable redirect url",
                transaction_id,
            ),
        },
        Some(status) => {
            let cause = go_failure_cause(status);
            tracing::warn!(tid = %transaction_id, status, ?cause, message = %message, "partner declined initiation");
            PaymentOutcome::failure(cause, message, transaction_id)
        }
        None => PaymentOutcome::failure(
            FailureCause::InternalError,
            "partner response carries no status",
            transaction_id,
        ),
    }
}

pub fn classify_status_check(
    result: &PartnerResult<StatusCheckResponse>,
    transaction_id: &str,
) -> PaymentOutcome {
    let check = match result {
        PartnerResult::NoContent => {
            return PaymentOutcome::failure(FailureCause::InternalError, NO_CONTENT_MESSAGE, transaction_id)
        }
        PartnerResult::Content(check) => check,
    };

    match (check.status, check.code) {
        (CheckStatus::Ok, None | Some(STATUS_CHECK_CODE_OK)) => PaymentOutcome::Success {
            transaction_id: echoed(check.tid.as_deref(), transaction_id),
            details: check.details(),
        },
        (CheckStatus::Nok, code) => {
            let message = check.message.clone().unwrap_or_else(|| NOT_FOUND_MESSAGE.to_string());
            tracing::warn!(tid = %transaction_id, ?code, message = %message, "partner does not know the transaction");
            PaymentOutcome::failure(FailureCause::PaymentPartnerError, message, transaction_id)
        }
        (status, code) => {
            let cause = code.map(status_check_failure_cause).unwrap_or(DEFAULT_FAILURE_CAUSE);
            let message = check.message.clone().unwrap_or_default();
            tracing::warn!(tid = %transaction_id, ?status, ?code, ?cause, message = %message, "partner reported a failed transaction");
            PaymentOutcome::failure(cause, message, transaction_id)
        }
    }
}

fn redirect_url(raw: &str) -> Option<String> {
    let url = reqwest::Url::parse(raw.trim()).ok()?;
    matches!(url.scheme(), "http" | "https").then(|| url.to_string())
}

fn echoed(partner_tid: Option<&str>, ours: &str) -> String {
    partner_tid
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(ours)
        .to_string()
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TsiOutcomeMapper;

impl OutcomeMapper for TsiOutcomeMapper {
    fn map_initiation(&self, raw: &RawHttpResponse, transaction_id: &str) -> Result<PaymentOutcome> {
        Ok(classify_go(&parse(raw)?, transaction_id))
    }

    fn map_status_check(&self, raw: &RawHttpResponse, transaction_id: &str) -> Result<PaymentOutcome> {
        Ok(classify_status_check(&parse(raw)?, transaction_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn go(status: Option<i32>, url: Option<&str>) -> PartnerResult<GoResponse> {
        PartnerResult::Content(GoResponse {
            status,
            message: Some("msg".to_string()),
            tid: None,
            url: url.map(str::to_string),
        })
    }

    #[test]
    fn ok_go_with_url_redirects() {
        let outcome = classify_go(&go(Some(1), Some("https://pay.tsi.example/p/abc")), "T1");
        assert_eq!(
            outcome,
            PaymentOutcome::RedirectTo {
                url: "https://pay.tsi.example/p/abc".to_string(),
                transaction_id: "T1".to_string(),
            }
        );
    }

    #[test]
    fn ok_go_without_usable_url_is_internal() {
        for url in [None, Some("not a url"), Some("ftp://files.example/x")] {
            let outcome = classify_go(&go(Some(1), url), "T1");
            assert_eq!(outcome.failure_cause(), Some(FailureCause::InternalError));
        }
    }

    #[test]
    fn go_business_codes_use_the_table() {
        assert_eq!(
            classify_go(&go(Some(3), None), "T1").failure_cause(),
            Some(FailureCause::InvalidData)
        );
        assert_eq!(
            classify_go(&go(Some(77), None), "T1").failure_cause(),
            Some(DEFAULT_FAILURE_CAUSE)
        );
        assert_eq!(
            classify_go(&go(None, None), "T1").failure_cause(),
            Some(FailureCause::InternalError)
        );
    }

    #[test]
    fn no_content_is_internal() {
        let outcome = classify_status_check(&PartnerResult::NoContent, "T1");
        assert_eq!(outcome.failure_cause(), Some(FailureCause::InternalError));
        assert_eq!(outcome.transaction_id(), "T1");
    }

    #[test]
    fn partner_tid_wins_when_present() {
        assert_eq!(echoed(Some("P9"), "T1"), "P9");
        assert_eq!(echoed(Some(" "), "T1"), "T1");
        assert_eq!(echoed(None, "T1"), "T1");
    }
}
