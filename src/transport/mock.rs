use crate::error::{ConnectorError, Result};
use crate::transport::keep_alive::DEFAULT_KEEP_ALIVE;
use crate::transport::retry::{retry_bounded, RetryPolicy};
use crate::transport::{RawHttpResponse, Transport, WireRequest};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum MockReply {
    Respond { status: u16, body: Option<String> },
    /// Behaves like a dropped connection: retryable, no response.
    Drop,
}

impl MockReply {
    pub fn ok_json(body: impl Into<String>) -> Self {
        MockReply::Respond {
            status: 200,
            body: Some(body.into()),
        }
    }
}

/// Scripted transport. Every attempt consumes one reply; an exhausted script
/// behaves like a dropped connection. Retries follow the same bounded policy
/// as [`crate::transport::http_client::HttpTransport`].
pub struct MockTransport {
    replies: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<WireRequest>>,
    attempts: AtomicU32,
    retry: RetryPolicy,
}

impl MockTransport {
    pub fn new(replies: impl IntoIterator<Item = MockReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
            attempts: AtomicU32::new(0),
            retry: RetryPolicy::default(),
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Requests passed to `send`, one entry per call regardless of retries.
    pub fn requests(&self) -> Vec<WireRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    fn next_reply(&self) -> std::result::Result<RawHttpResponse, String> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let reply = self.replies.lock().ok().and_then(|mut r| r.pop_front());
        match reply {
            Some(MockReply::Respond { status, body }) => Ok(RawHttpResponse {
                status,
                status_message: reqwest::StatusCode::from_u16(status)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .unwrap_or_default()
                    .to_string(),
                body: body.filter(|b| !b.is_empty()),
                elapsed: Duration::from_millis(1),
                keep_alive: DEFAULT_KEEP_ALIVE,
            }),
            Some(MockReply::Drop) | None => Err("scripted connection drop".to_string()),
        }
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &WireRequest) -> Result<RawHttpResponse> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        retry_bounded(&self.retry, |_| true, |_| {
            std::future::ready(self.next_reply())
        })
        .await
        .map_err(|exhausted| ConnectorError::CommunicationFailure {
            attempts: exhausted.attempts,
            message: exhausted.last_error,
        })
    }
}
