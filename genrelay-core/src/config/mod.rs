//! Configuration for the relay
//!
//! Configuration is environment-derived, read once at startup, and immutable
//! afterwards. The API key is optional at load time: a relay without a key
//! still starts and answers every generation request with a configuration
//! error, so a misdeployed instance is observable rather than crash-looping.

mod error;
mod secrets;

pub use error::ConfigError;
pub use secrets::SecretString;

use crate::providers::{ProviderKind, RetryPolicy};
use std::env;

/// Environment variable selecting the provider family (`gemini` | `groq`)
pub const PROVIDER_ENV: &str = "GENRELAY_PROVIDER";
/// Environment variable overriding the model name
pub const MODEL_ENV: &str = "GENRELAY_MODEL";
/// Environment variable overriding the provider base URL
pub const BASE_URL_ENV: &str = "GENRELAY_BASE_URL";
/// API key variables, in the order the original service consulted them
pub const GROQ_KEY_ENV: &str = "GROQ_API_KEY";
pub const GEMINI_KEY_ENV: &str = "GEMINI_API_KEY";

/// Process-wide relay configuration, constructed once at startup.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Which provider family to relay to
    pub provider: ProviderKind,

    /// Provider API key; `None` means "server not configured"
    pub api_key: Option<SecretString>,

    /// Model override; adapter default when `None`
    pub model: Option<String>,

    /// Base URL override; adapter default when `None`
    pub base_url: Option<String>,

    /// Retry policy for the resilient caller
    pub retry: RetryPolicy,
}

impl RelayConfig {
    /// Build a configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let provider = match env::var(PROVIDER_ENV) {
            Ok(value) => value
                .parse::<ProviderKind>()
                .map_err(|message| ConfigError::Invalid {
                    var: PROVIDER_ENV.to_string(),
                    message,
                })?,
            Err(_) => ProviderKind::default(),
        };

        // Prefer the key matching the selected provider, fall back to the
        // other family's key so either variable satisfies the requirement.
        let (primary, secondary) = match provider {
            ProviderKind::Groq => (GROQ_KEY_ENV, GEMINI_KEY_ENV),
            ProviderKind::Gemini => (GEMINI_KEY_ENV, GROQ_KEY_ENV),
        };
        let api_key = env::var(primary)
            .or_else(|_| env::var(secondary))
            .ok()
            .filter(|key| !key.is_empty())
            .map(SecretString::new);

        Ok(Self {
            provider,
            api_key,
            model: env::var(MODEL_ENV).ok().filter(|m| !m.is_empty()),
            base_url: env::var(BASE_URL_ENV).ok().filter(|u| !u.is_empty()),
            retry: RetryPolicy::default(),
        })
    }

    /// Start from a provider kind with no key and all defaults.
    pub fn for_provider(provider: ProviderKind) -> Self {
        Self {
            provider,
            api_key: None,
            model: None,
            base_url: None,
            retry: RetryPolicy::default(),
        }
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<SecretString>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Override the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Override the provider base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Override the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

/// Resolved per-provider settings handed to an adapter. Only constructed
/// once an API key is known to be present.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    /// Provider API key
    pub api_key: SecretString,

    /// Model name to request
    pub model: String,

    /// Base URL of the provider's API
    pub base_url: String,
}
