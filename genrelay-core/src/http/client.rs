//! Outbound HTTP client built on reqwest

use crate::http::error::{map_status, parse_retry_after};
use crate::protocol::{ProviderCallSpec, ProviderResponse};
use crate::providers::ProviderError;
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("genrelay/", env!("CARGO_PKG_VERSION"));

/// Seam between the retry loop and the wire. The production implementation
/// is [`HttpClient`]; tests substitute counting or scripted executors.
#[async_trait]
pub trait CallExecutor: Send + Sync {
    /// Execute one attempt of a provider call.
    ///
    /// Returns the parsed 2xx response, or a classified error. A response
    /// with a non-2xx status is an error carrying that status; receiving no
    /// response at all is a [`ProviderError::Network`].
    async fn execute(&self, spec: &ProviderCallSpec) -> Result<ProviderResponse, ProviderError>;
}

/// Pooled HTTP client shared across requests.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a client with default pool and timeout settings.
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_timeouts(Duration::from_secs(10), Duration::from_secs(60))
    }

    /// Create a client with explicit connect and request timeouts.
    pub fn with_timeouts(
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = ClientBuilder::new()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .user_agent(USER_AGENT)
            .gzip(true)
            .build()
            .map_err(|e| ProviderError::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl CallExecutor for HttpClient {
    async fn execute(&self, spec: &ProviderCallSpec) -> Result<ProviderResponse, ProviderError> {
        let mut builder = self.client.post(&spec.url).json(&spec.body);
        for (name, value) in &spec.headers {
            builder = builder.header(name, value);
        }

        // send() errors mean no usable response: connectivity, DNS, timeout
        let response = builder.send().await.map_err(ProviderError::from)?;

        let status = response.status();
        debug!(status = status.as_u16(), "provider responded");

        if !status.is_success() {
            let retry_after_secs = parse_retry_after(response.headers());
            let body = match response.text().await {
                Ok(text) if text.is_empty() => None,
                Ok(text) => Some(
                    serde_json::from_str(&text)
                        .unwrap_or_else(|_| serde_json::Value::String(text)),
                ),
                Err(_) => None,
            };
            warn!(status = status.as_u16(), "provider returned error status");
            return Err(map_status(status, retry_after_secs, body));
        }

        let body = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        Ok(ProviderResponse {
            status: status.as_u16(),
            body,
        })
    }
}
