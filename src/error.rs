use crate::domain::outcome::FailureCause;
use thiserror::Error;

/// Everything that can stop a payment flow before the partner's answer is
/// classified. Each kind maps onto exactly one [`FailureCause`].
#[derive(Error, Debug)]
pub enum ConnectorError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("no response from partner after {attempts} attempt(s): {message}")]
    CommunicationFailure { attempts: u32, message: String },
    #[error("partner answered with HTTP {status} {message}")]
    PartnerHttpError { status: u16, message: String },
    #[error("malformed partner response: {0}")]
    MalformedResponse(String),
}

impl ConnectorError {
    pub fn failure_cause(&self) -> FailureCause {
        match self {
            ConnectorError::InvalidRequest(_) => FailureCause::InvalidData,
            ConnectorError::CommunicationFailure { .. } | ConnectorError::PartnerHttpError { .. } => {
                FailureCause::CommunicationError
            }
            ConnectorError::Configuration(_) | ConnectorError::MalformedResponse(_) => {
                FailureCause::InternalError
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ConnectorError>;
