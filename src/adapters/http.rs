//! HTTP transport for the curve service
//!
//! Sends compiled requests with reqwest, authenticates with an `X-Api-Key`
//! header and retries connection failures, timeouts and 5xx responses with
//! exponential backoff. 4xx responses fail immediately.

use super::transport::{cancelled, Payload, Transport};
use crate::config::{ApiKey, RetryConfig, ServiceConfig};
use crate::domain::{CurveQueryError, Result, TransportError};
use crate::log_retry_attempt;
use crate::query::route::OutboundRequest;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder, StatusCode};
use secrecy::ExposeSecret;
use serde_json::Value;
use std::time::Duration;
use tokio::sync::watch;
use url::Url;

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// reqwest-based [`Transport`]
///
/// # Example
///
/// ```no_run
/// use curvequery::adapters::HttpTransport;
/// use curvequery::config::load_config;
///
/// # fn example() -> curvequery::domain::Result<()> {
/// let config = load_config("curvequery.toml")?;
/// let transport = HttpTransport::new(&config.service)?;
/// # Ok(())
/// # }
/// ```
pub struct HttpTransport {
    /// Service root, always ending with `/`
    base_url: Url,

    client: Client,

    api_key: Option<ApiKey>,

    retry: RetryConfig,
}

impl HttpTransport {
    /// Build a transport from the service section of the configuration
    ///
    /// # Errors
    ///
    /// Returns [`CurveQueryError::Configuration`] for an unparsable base URL
    /// or an HTTP client that cannot be built
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let mut base_url = Url::parse(&config.base_url).map_err(|e| {
            CurveQueryError::Configuration(format!(
                "Invalid service.base_url '{}': {e}",
                config.base_url
            ))
        })?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                CurveQueryError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        if config.api_key.is_none() {
            tracing::warn!("No API key configured, sending unauthenticated requests");
        }

        Ok(Self {
            base_url,
            client,
            api_key: config.api_key.clone(),
            retry: config.retry.clone(),
        })
    }

    /// Absolute URL of a compiled request
    fn url_for(&self, request: &OutboundRequest) -> std::result::Result<Url, TransportError> {
        let mut url = self
            .base_url
            .join(&request.path)
            .map_err(|e| TransportError::InvalidResponse(format!("Invalid request path: {e}")))?;
        if !request.query.is_empty() {
            url.set_query(Some(&request.query_string()));
        }
        Ok(url)
    }

    /// Delay before retry number `attempt` (starting at 1)
    fn delay_for(&self, attempt: usize) -> Duration {
        let exponent = i32::try_from(attempt.saturating_sub(1)).unwrap_or(i32::MAX);
        let delay_ms = (self.retry.initial_delay_ms as f64)
            * self.retry.backoff_multiplier.powi(exponent);
        let delay_ms = delay_ms.min(self.retry.max_delay_ms as f64);
        Duration::from_millis(delay_ms as u64)
    }

    async fn send_once(&self, url: &Url) -> std::result::Result<Payload, TransportError> {
        let mut request = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json");

        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key.expose_secret().as_str());
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout(e.to_string())
            } else {
                TransportError::ConnectionFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(Payload::Empty);
        }
        if status.is_client_error() {
            let message = response.text().await.unwrap_or_default();
            return Err(TransportError::ClientError {
                status: status.as_u16(),
                message,
            });
        }
        if status.is_server_error() {
            let message = response.text().await.unwrap_or_default();
            return Err(TransportError::ServerError {
                status: status.as_u16(),
                message,
            });
        }
        if !status.is_success() {
            return Err(TransportError::InvalidResponse(format!(
                "Unexpected status {status}"
            )));
        }

        if let Some(content_type) = response.headers().get(CONTENT_TYPE) {
            let content_type = content_type.to_str().unwrap_or_default();
            if !content_type.contains("json") {
                return Err(TransportError::UnsupportedContentType(
                    content_type.to_string(),
                ));
            }
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::InvalidResponse(e.to_string()))?;
        if body.is_empty() {
            return Ok(Payload::Empty);
        }

        let rows: Vec<Value> = serde_json::from_slice(&body)
            .map_err(|e| TransportError::InvalidResponse(format!("Expected a JSON array: {e}")))?;

        Ok(Payload::Rows(rows))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        request: &OutboundRequest,
        cancel: watch::Receiver<bool>,
    ) -> std::result::Result<Payload, TransportError> {
        let url = self.url_for(request)?;
        let max_retries = self.retry.max_retries;
        let mut attempt = 0;

        loop {
            tracing::debug!(url = %url, attempt = attempt, "Sending curve request");

            let outcome = tokio::select! {
                biased;
                _ = cancelled(cancel.clone()) => return Err(TransportError::Cancelled),
                outcome = self.send_once(&url) => outcome,
            };

            match outcome {
                Ok(payload) => return Ok(payload),
                Err(e) if e.is_retryable() && attempt < max_retries => {
                    attempt += 1;
                    let delay = self.delay_for(attempt);
                    log_retry_attempt!(attempt, max_retries, delay.as_millis() as u64, e);

                    tokio::select! {
                        biased;
                        _ = cancelled(cancel.clone()) => return Err(TransportError::Cancelled),
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }
}
