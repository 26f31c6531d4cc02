//! Core protocol types for the relay
//!
//! These are the provider-agnostic shapes: what the client sends, what the
//! client gets back, and the intermediate call specification the adapters
//! build for the resilient caller. The inbound JSON uses camelCase field
//! names, so the request type carries serde renames.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A provider-agnostic generation request, constructed once per inbound call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Free-text prompt; the sole user-turn content sent to the provider
    #[serde(default)]
    pub prompt: String,

    /// Optional system instruction, placed at the provider-specific location
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub system_instruction: Option<String>,

    /// When true, ask the provider to constrain output to valid JSON
    #[serde(default)]
    pub json_mode: bool,
}

impl GenerationRequest {
    /// Create a request from a bare prompt.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_instruction: None,
            json_mode: false,
        }
    }

    /// Set the system instruction.
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// Request structured (JSON) output from the provider.
    pub fn with_json_mode(mut self, json_mode: bool) -> Self {
        self.json_mode = json_mode;
        self
    }
}

/// A fully-resolved outbound call: URL, JSON body, and headers.
///
/// Built fresh per request by a [`crate::providers::ProviderAdapter`] and
/// never reused across providers. Idempotent with respect to retries: the
/// resilient caller re-sends the same spec on every attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderCallSpec {
    /// Absolute URL of the provider's generation endpoint
    pub url: String,

    /// Provider-specific JSON request body
    pub body: serde_json::Value,

    /// Headers to send, including Content-Type and authentication
    pub headers: HashMap<String, String>,
}

/// Raw provider HTTP response after a successful (2xx) call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// HTTP status code returned by the provider
    pub status: u16,

    /// Parsed JSON response body
    pub body: serde_json::Value,
}

/// The terminal success outcome of a generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Extracted generated text; empty when the provider returned no content
    pub text: String,

    /// The provider's full response payload, passed through for diagnostics
    pub raw: serde_json::Value,
}
