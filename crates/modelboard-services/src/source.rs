//! HTTP client for remote catalog documents

use std::time::Duration;

use modelboard_core::{parse_payload, SourcePayload, ValidationError};
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("network error: {0}")]
    Network(reqwest::Error),

    #[error("HTTP {0}")]
    Status(StatusCode),

    #[error("timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("cancelled")]
    Cancelled,

    #[error("failed to read response: {0}")]
    Body(reqwest::Error),

    #[error("{0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone, Default)]
pub struct SourceClient {
    client: reqwest::Client,
}

impl SourceClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Fetch and validate a catalog document.
    ///
    /// The request is dropped, and with it the connection, once `timeout`
    /// elapses or `cancel` fires.
    #[instrument(skip(self, cancel), fields(timeout_ms = timeout.as_millis() as u64))]
    pub async fn fetch(
        &self,
        url: &str,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> Result<SourcePayload, SourceError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(SourceError::Cancelled),
            _ = tokio::time::sleep(timeout) => Err(SourceError::Timeout(timeout)),
            result = self.request(url) => result,
        }
    }

    async fn request(&self, url: &str) -> Result<SourcePayload, SourceError> {
        let resp = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(SourceError::Network)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::Status(status));
        }

        let body = resp.text().await.map_err(SourceError::Body)?;
        debug!("Received {} bytes", body.len());

        Ok(parse_payload(&body)?)
    }
}
