//! Provider HTTP error classification
//!
//! A non-2xx response becomes a [`ProviderError`] carrying the status to
//! report, the most specific message available, and the raw body as opaque
//! details. The provider's own embedded error message is preferred over the
//! static per-status fallbacks.

use crate::providers::ProviderError;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::StatusCode;
use serde_json::Value;

/// Map a provider response status and body to a classified error.
pub fn map_status(status: StatusCode, retry_after_secs: Option<u64>, body: Option<Value>) -> ProviderError {
    let message = embedded_message(body.as_ref()).unwrap_or_else(|| fallback_message(status));
    let details = body;

    match status {
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited {
            message,
            retry_after_secs,
            details,
        },
        StatusCode::SERVICE_UNAVAILABLE => ProviderError::Unavailable {
            message,
            retry_after_secs,
            details,
        },
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ProviderError::Authentication { message, details }
        }
        StatusCode::BAD_REQUEST => ProviderError::InvalidRequest { message, details },
        StatusCode::NOT_FOUND => ProviderError::ModelNotFound { message, details },
        _ => ProviderError::Upstream {
            status: status.as_u16(),
            message,
            details,
        },
    }
}

/// Parse the Retry-After header as delay-seconds. HTTP-date values are not
/// handled; the providers in scope send integer seconds.
pub fn parse_retry_after(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
}

/// Pull the provider's own error message out of the response body.
///
/// Both families use `{ "error": { "message": ... } }`; bare
/// `{ "error": "..." }` and `{ "message": "..." }` shapes are accepted too.
fn embedded_message(body: Option<&Value>) -> Option<String> {
    let body = body?;

    if let Some(message) = body.pointer("/error/message").and_then(|v| v.as_str()) {
        return Some(message.to_string());
    }
    if let Some(message) = body.get("error").and_then(|v| v.as_str()) {
        return Some(message.to_string());
    }
    if let Some(message) = body.get("message").and_then(|v| v.as_str()) {
        return Some(message.to_string());
    }

    None
}

fn fallback_message(status: StatusCode) -> String {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => "Invalid API key".to_string(),
        StatusCode::TOO_MANY_REQUESTS => "Rate limited by provider".to_string(),
        StatusCode::NOT_FOUND => "Unknown model".to_string(),
        StatusCode::BAD_REQUEST => "Malformed request".to_string(),
        StatusCode::SERVICE_UNAVAILABLE => "Provider temporarily unavailable".to_string(),
        _ => format!("Provider error {}", status.as_u16()),
    }
}
