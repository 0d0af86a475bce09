use crate::error::{ConnectorError, Result};
use std::time::Duration;

pub mod http_client;
pub mod keep_alive;
pub mod mock;
pub mod retry;

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireRequest {
    pub scheme: String,
    pub host: String,
    pub path: String,
    pub body: String,
    pub content_type: String,
}

impl WireRequest {
    pub fn url(&self) -> Result<reqwest::Url> {
        let path = if self.path.starts_with('/') {
            self.path.clone()
        } else {
            format!("/{}", self.path)
        };
        let raw = format!("{}://{}{}", self.scheme, self.host, path);
        reqwest::Url::parse(&raw)
            .map_err(|e| ConnectorError::Configuration(format!("invalid partner endpoint {raw}: {e}")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawHttpResponse {
    pub status: u16,
    pub status_message: String,
    /// `None` when the partner sent no body at all, or an empty one.
    pub body: Option<String>,
    pub elapsed: Duration,
    pub keep_alive: Duration,
}

impl RawHttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one wire request to the partner. Implementations retry transport
/// failures internally and only return `CommunicationFailure` once the retry
/// budget is spent. A response with an error status is still `Ok`.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &WireRequest) -> Result<RawHttpResponse>;
}
