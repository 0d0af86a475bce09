use crate::domain::payment::{Environment, MerchantCredentials, PaymentIntent};
use serde::Deserialize;

/// What the host hands back when the shopper returns from the partner site.
#[derive(Debug, Clone, Deserialize)]
pub struct ResumeContext {
    #[serde(default)]
    pub transaction_id: String,
    #[serde(default)]
    pub credentials: MerchantCredentials,
    #[serde(default)]
    pub sandbox: bool,
    /// Set by the host when the redirect session timed out.
    #[serde(default)]
    pub session_expired: bool,
}

impl ResumeContext {
    pub fn environment(&self) -> Environment {
        Environment::from_sandbox(self.sandbox)
    }
}

pub fn resume_context(intent: &PaymentIntent) -> ResumeContext {
    ResumeContext {
        transaction_id: intent.transaction_id.clone(),
        credentials: intent.credentials.clone(),
        sandbox: intent.sandbox,
        session_expired: false,
    }
}
