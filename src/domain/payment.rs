use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Environment {
    Test,
    Prod,
}

impl Environment {
    /// Sandbox traffic goes to the partner's test platform, everything else to production.
    pub fn from_sandbox(sandbox: bool) -> Self {
        if sandbox {
            Environment::Test
        } else {
            Environment::Prod
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Test => "TEST",
            Environment::Prod => "PROD",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Merchant contract values needed to talk to the partner.
///
/// Missing fields deserialize as empty strings so that the request builder,
/// not the JSON layer, decides they are invalid.
#[derive(Clone, Default, Deserialize)]
pub struct MerchantCredentials {
    #[serde(default)]
    pub merchant_id: String,
    #[serde(default)]
    pub key_id: String,
    #[serde(default)]
    pub key_value: String,
}

impl fmt::Debug for MerchantCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MerchantCredentials")
            .field("merchant_id", &self.merchant_id)
            .field("key_id", &self.key_id)
            .field("key_value", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReturnUrls {
    #[serde(default)]
    pub success_url: String,
    #[serde(default)]
    pub cancel_url: String,
    #[serde(default)]
    pub notification_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    #[serde(default)]
    pub transaction_id: String,
    #[serde(default)]
    pub amount_minor: i64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub credentials: MerchantCredentials,
    #[serde(default)]
    pub sandbox: bool,
    #[serde(default)]
    pub soft_descriptor: Option<String>,
    #[serde(default)]
    pub product_description: Option<String>,
    #[serde(default)]
    pub return_urls: ReturnUrls,
}

impl PaymentIntent {
    pub fn environment(&self) -> Environment {
        Environment::from_sandbox(self.sandbox)
    }
}
