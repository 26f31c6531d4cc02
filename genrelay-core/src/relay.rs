//! Relay orchestrator
//!
//! Ties the pieces together for one generation request: configuration check,
//! request translation, resilient call, text extraction. Each inbound
//! request runs its own retry loop over its own call spec; the only shared
//! state is the read-only configuration and the pooled HTTP client.

use crate::config::{ProviderSettings, RelayConfig};
use crate::http::{CallExecutor, HttpClient};
use crate::protocol::{GenerationRequest, GenerationResult};
use crate::providers::{ProviderAdapter, ProviderError, RetryPolicy};
use crate::providers::retry;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// The relay core: one provider adapter, one executor, one retry policy.
pub struct Relay {
    adapter: Box<dyn ProviderAdapter>,
    executor: Arc<dyn CallExecutor>,
    settings: Option<ProviderSettings>,
    policy: RetryPolicy,
}

impl Relay {
    /// Build a relay from configuration, using the pooled [`HttpClient`].
    pub fn from_config(config: &RelayConfig) -> Result<Self, ProviderError> {
        let executor = Arc::new(HttpClient::new()?);
        Ok(Self::with_executor(config, executor))
    }

    /// Build a relay with an explicit executor (used by tests).
    pub fn with_executor(config: &RelayConfig, executor: Arc<dyn CallExecutor>) -> Self {
        let adapter = config.provider.create_adapter();
        let settings = config.api_key.clone().map(|api_key| ProviderSettings {
            api_key,
            model: config
                .model
                .clone()
                .unwrap_or_else(|| adapter.default_model().to_string()),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| adapter.default_base_url().to_string()),
        });

        Self {
            adapter,
            executor,
            settings,
            policy: config.retry,
        }
    }

    /// Whether an API key is configured.
    pub fn is_configured(&self) -> bool {
        self.settings.is_some()
    }

    /// The name of the configured provider family.
    pub fn provider_name(&self) -> &'static str {
        self.adapter.name()
    }

    /// Run one generation request to a terminal outcome.
    ///
    /// Exactly one of a [`GenerationResult`] or a classified
    /// [`ProviderError`] comes back; a missing API key fails fast before any
    /// network call.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, ProviderError> {
        let settings = self.settings.as_ref().ok_or(ProviderError::NotConfigured)?;

        let request_id = Uuid::new_v4();
        let spec = self.adapter.build_call(request, settings);
        debug!(
            %request_id,
            provider = self.adapter.name(),
            url = %spec.url,
            json_mode = request.json_mode,
            "dispatching generation request"
        );

        let response = retry::execute(&self.policy, || self.executor.execute(&spec)).await?;

        let text = self.adapter.extract_text(&response.body);
        info!(
            %request_id,
            provider = self.adapter.name(),
            chars = text.len(),
            "generation completed"
        );

        Ok(GenerationResult {
            text,
            raw: response.body,
        })
    }
}
