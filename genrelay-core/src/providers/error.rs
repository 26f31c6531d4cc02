//! Provider error types and classification
//!
//! Every failure of an outbound generation call ends up as a
//! [`ProviderError`]. The variant determines the client-facing HTTP status
//! and whether the resilient caller may retry.

use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors that can occur when calling an LLM provider.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// Provider responded 429; retryable, honoring Retry-After when present
    #[error("{message}")]
    RateLimited {
        message: String,
        retry_after_secs: Option<u64>,
        details: Option<Value>,
    },

    /// Provider responded 503; retryable
    #[error("{message}")]
    Unavailable {
        message: String,
        retry_after_secs: Option<u64>,
        details: Option<Value>,
    },

    /// Provider rejected the credentials (401/403); never retried
    #[error("{message}")]
    Authentication { message: String, details: Option<Value> },

    /// Provider rejected the request shape (400); never retried
    #[error("{message}")]
    InvalidRequest { message: String, details: Option<Value> },

    /// Requested model does not exist (404); never retried
    #[error("{message}")]
    ModelNotFound { message: String, details: Option<Value> },

    /// No response received at all; retryable, reported as unreachable
    #[error("Provider unreachable: {message}")]
    Network { message: String },

    /// Provider returned a body the relay could not parse
    #[error("Failed to parse provider response: {0}")]
    Parse(String),

    /// No API key configured; fails fast before any network call
    #[error("server not configured")]
    NotConfigured,

    /// Any other provider HTTP error, surfaced with its original status
    #[error("{message}")]
    Upstream {
        status: u16,
        message: String,
        details: Option<Value>,
    },

    /// Unexpected local failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProviderError {
    /// Whether the resilient caller may retry this failure.
    ///
    /// Transient provider statuses (429, 503) and connectivity failures are
    /// retryable; everything else recurs identically on retry.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. } | Self::Unavailable { .. } | Self::Network { .. }
        )
    }

    /// The HTTP status to report to the relay's own client.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::RateLimited { .. } => 429,
            Self::Unavailable { .. } | Self::Network { .. } => 503,
            Self::Authentication { .. } => 401,
            Self::InvalidRequest { .. } => 400,
            Self::ModelNotFound { .. } => 404,
            Self::Upstream { status, .. } => *status,
            Self::Parse(_) | Self::NotConfigured | Self::Internal(_) => 500,
        }
    }

    /// Delay requested by the provider via Retry-After, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after_secs, .. }
            | Self::Unavailable { retry_after_secs, .. } => {
                retry_after_secs.map(Duration::from_secs)
            }
            _ => None,
        }
    }

    /// Opaque provider payload attached for diagnostics, if any.
    pub fn details(&self) -> Option<&Value> {
        match self {
            Self::RateLimited { details, .. }
            | Self::Unavailable { details, .. }
            | Self::Authentication { details, .. }
            | Self::InvalidRequest { details, .. }
            | Self::ModelNotFound { details, .. }
            | Self::Upstream { details, .. } => details.as_ref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Network {
                message: format!("request timed out: {}", err),
            }
        } else if err.is_connect() {
            ProviderError::Network {
                message: format!("connection failed: {}", err),
            }
        } else if err.is_decode() {
            ProviderError::Parse(err.to_string())
        } else {
            ProviderError::Network {
                message: err.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Parse(err.to_string())
    }
}
