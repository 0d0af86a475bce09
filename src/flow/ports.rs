use crate::domain::context::ResumeContext;
use crate::domain::outcome::PaymentOutcome;
use crate::domain::payment::PaymentIntent;
use crate::error::Result;
use crate::transport::{RawHttpResponse, WireRequest};

/// Turns caller values into partner wire requests. Validation happens here,
/// before anything reaches the network.
pub trait RequestBuilder: Send + Sync {
    fn build_authorization_request(&self, intent: &PaymentIntent) -> Result<WireRequest>;
    fn build_status_check_request(&self, context: &ResumeContext) -> Result<WireRequest>;
}

/// Parses a successful (2xx) partner response and classifies it.
/// Fails only when the body is present but unreadable.
pub trait OutcomeMapper: Send + Sync {
    fn map_initiation(&self, raw: &RawHttpResponse, transaction_id: &str) -> Result<PaymentOutcome>;
    fn map_status_check(&self, raw: &RawHttpResponse, transaction_id: &str) -> Result<PaymentOutcome>;
}
