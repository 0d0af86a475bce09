use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureCause {
    InvalidData,
    CommunicationError,
    PaymentPartnerError,
    InternalError,
    SessionExpired,
}

/// Domain fields the partner reports for a transaction it found.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TransactionDetails {
    pub partner_transaction_id: Option<String>,
    pub amount: Option<Decimal>,
    pub fixed_amount: Option<bool>,
    pub date: Option<NaiveDateTime>,
    pub country: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentOutcome {
    RedirectTo {
        url: String,
        transaction_id: String,
    },
    Success {
        transaction_id: String,
        details: TransactionDetails,
    },
    Failure {
        cause: FailureCause,
        message: String,
        transaction_id: String,
    },
}

impl PaymentOutcome {
    pub fn failure(cause: FailureCause, message: impl Into<String>, transaction_id: &str) -> Self {
        PaymentOutcome::Failure {
            cause,
            message: message.into(),
            transaction_id: transaction_id.to_string(),
        }
    }

    pub fn failure_cause(&self) -> Option<FailureCause> {
        match self {
            PaymentOutcome::Failure { cause, .. } => Some(*cause),
            _ => None,
        }
    }

    pub fn transaction_id(&self) -> &str {
        match self {
            PaymentOutcome::RedirectTo { transaction_id, .. }
            | PaymentOutcome::Success { transaction_id, .. }
            | PaymentOutcome::Failure { transaction_id, .. } => transaction_id,
        }
    }
}
