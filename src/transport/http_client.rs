use crate::error::{ConnectorError, Result};
use crate::transport::keep_alive::{self, DEFAULT_KEEP_ALIVE};
use crate::transport::retry::{retry_bounded, RetryPolicy};
use crate::transport::{RawHttpResponse, Transport, WireRequest};
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::Semaphore;

/// Timeouts are expressed in seconds, the way they are configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportSettings {
    pub connect_timeout_secs: u64,
    pub acquire_timeout_secs: u64,
    pub socket_timeout_secs: u64,
    pub max_connections: usize,
    pub retry: RetryPolicy,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 5,
            acquire_timeout_secs: 5,
            socket_timeout_secs: 10,
            max_connections: 2,
            retry: RetryPolicy::default(),
        }
    }
}

impl TransportSettings {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn socket_timeout(&self) -> Duration {
        Duration::from_secs(self.socket_timeout_secs)
    }
}

#[derive(Error, Debug)]
enum AttemptError {
    #[error("{0}")]
    Io(#[from] reqwest::Error),
    #[error("no pooled connection available within {0:?}")]
    PoolTimeout(Duration),
    #[error("transport is closed")]
    Closed,
}

impl AttemptError {
    fn is_retryable(&self) -> bool {
        !matches!(self, AttemptError::Closed)
    }
}

/// Pooled HTTP client shared by every payment flow of the process.
///
/// At most `max_connections` calls are in flight at once; a call waits up to
/// the acquire timeout for a slot. [`HttpTransport::close`] releases the pool,
/// after which every call fails without touching the network.
pub struct HttpTransport {
    client: reqwest::Client,
    permits: Arc<Semaphore>,
    settings: TransportSettings,
}

impl HttpTransport {
    pub fn new(settings: TransportSettings) -> Result<Self> {
        let max_connections = settings.max_connections.max(1);
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout())
            .read_timeout(settings.socket_timeout())
            .pool_max_idle_per_host(max_connections)
            .pool_idle_timeout(DEFAULT_KEEP_ALIVE)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| ConnectorError::Configuration(format!("cannot build http client: {e}")))?;

        Ok(Self {
            client,
            permits: Arc::new(Semaphore::new(max_connections)),
            settings,
        })
    }

    pub fn settings(&self) -> &TransportSettings {
        &self.settings
    }

    pub fn close(&self) {
        self.permits.close();
    }

    pub fn is_closed(&self) -> bool {
        self.permits.is_closed()
    }

    async fn attempt(
        &self,
        url: &Url,
        request: &WireRequest,
        attempt: u32,
    ) -> std::result::Result<RawHttpResponse, AttemptError> {
        let started = Instant::now();
        tracing::info!(host = %request.host, attempt, "calling partner");
        match self.exchange(url, request, started).await {
            Ok(response) => {
                tracing::info!(
                    elapsed_ms = response.elapsed.as_millis() as u64,
                    status = response.status,
                    keep_alive_secs = response.keep_alive.as_secs(),
                    attempt,
                    "partner call completed"
                );
                Ok(response)
            }
            Err(err) => {
                tracing::error!(
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    attempt,
                    error = %err,
                    "partner call failed"
                );
                Err(err)
            }
        }
    }

    async fn exchange(
        &self,
        url: &Url,
        request: &WireRequest,
        started: Instant,
    ) -> std::result::Result<RawHttpResponse, AttemptError> {
        let acquire_timeout = self.settings.acquire_timeout();
        let _permit = match tokio::time::timeout(acquire_timeout, self.permits.acquire()).await {
            Ok(Ok(permit)) => permit,
            Ok(Err(_)) => return Err(AttemptError::Closed),
            Err(_) => return Err(AttemptError::PoolTimeout(acquire_timeout)),
        };

        let response = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, request.content_type.as_str())
            .body(request.body.clone())
            .send()
            .await?;

        let status = response.status();
        let keep_alive = keep_alive::negotiate(response.headers());
        let body = response.text().await?;

        Ok(RawHttpResponse {
            status: status.as_u16(),
            status_message: status.canonical_reason().unwrap_or_default().to_string(),
            body: (!body.is_empty()).then_some(body),
            elapsed: started.elapsed(),
            keep_alive,
        })
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &WireRequest) -> Result<RawHttpResponse> {
        let url = request.url()?;
        let url = &url;

        retry_bounded(&self.settings.retry, AttemptError::is_retryable, move |attempt| {
            self.attempt(url, request, attempt)
        })
        .await
        .map_err(|exhausted| ConnectorError::CommunicationFailure {
            attempts: exhausted.attempts,
            message: exhausted.last_error.to_string(),
        })
    }
}
