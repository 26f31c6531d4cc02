//! Provider adapter trait and provider-family selection

use crate::config::ProviderSettings;
use crate::protocol::{GenerationRequest, ProviderCallSpec};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Core trait every supported provider family implements.
///
/// Adapters are pure: `build_call` and `extract_text` perform no I/O and
/// never fail. Everything that can go wrong (missing key, network, provider
/// errors) is handled by the caller around them.
pub trait ProviderAdapter: Send + Sync {
    /// The provider's name, used in logs and error messages
    fn name(&self) -> &'static str;

    /// Base URL used when configuration does not override it
    fn default_base_url(&self) -> &'static str;

    /// Model used when configuration does not override it
    fn default_model(&self) -> &'static str;

    /// Translate a request into the exact URL, body, and headers this
    /// provider's generation endpoint expects
    fn build_call(&self, request: &GenerationRequest, settings: &ProviderSettings)
        -> ProviderCallSpec;

    /// Extract the generated text from this provider's response body.
    ///
    /// Returns the empty string when the expected path is absent rather
    /// than failing; the raw payload is passed through to the client anyway.
    fn extract_text(&self, body: &serde_json::Value) -> String;
}

/// Supported provider families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Google Gemini generateContent API
    Gemini,
    /// Groq's OpenAI-compatible chat completions API
    #[default]
    Groq,
}

impl ProviderKind {
    /// Create an adapter instance for this provider family.
    pub fn create_adapter(&self) -> Box<dyn ProviderAdapter> {
        match self {
            ProviderKind::Gemini => Box::new(crate::providers::GeminiAdapter::new()),
            ProviderKind::Groq => Box::new(crate::providers::GroqAdapter::new()),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Gemini => write!(f, "gemini"),
            ProviderKind::Groq => write!(f, "groq"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            "groq" | "openai" => Ok(ProviderKind::Groq),
            other => Err(format!("unknown provider '{}'", other)),
        }
    }
}
