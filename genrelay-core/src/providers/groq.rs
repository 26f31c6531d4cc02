//! Groq (OpenAI-compatible) adapter
//!
//! Targets the `/chat/completions` endpoint with bearer-token
//! authentication. The system instruction travels as the first message with
//! the "system" role; a default instruction is supplied when the caller
//! omits one, matching the chat-completions convention.

use crate::config::ProviderSettings;
use crate::protocol::{GenerationRequest, ProviderCallSpec};
use crate::providers::adapter::ProviderAdapter;
use serde_json::json;
use std::collections::HashMap;

const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are a helpful AI assistant.";

/// Adapter for Groq's OpenAI-compatible chat completions API.
pub struct GroqAdapter;

impl GroqAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GroqAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderAdapter for GroqAdapter {
    fn name(&self) -> &'static str {
        "groq"
    }

    fn default_base_url(&self) -> &'static str {
        "https://api.groq.com/openai/v1"
    }

    fn default_model(&self) -> &'static str {
        "llama-3.3-70b-versatile"
    }

    fn build_call(
        &self,
        request: &GenerationRequest,
        settings: &ProviderSettings,
    ) -> ProviderCallSpec {
        let url = format!("{}/chat/completions", settings.base_url.trim_end_matches('/'));

        let system = request
            .system_instruction
            .as_deref()
            .unwrap_or(DEFAULT_SYSTEM_INSTRUCTION);

        let response_format = if request.json_mode {
            json!({ "type": "json_object" })
        } else {
            json!({ "type": "text" })
        };

        let body = json!({
            "model": settings.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": request.prompt },
            ],
            "temperature": 0.7,
            "max_tokens": 2048,
            "response_format": response_format,
        });

        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", settings.api_key.expose_secret()),
        );

        ProviderCallSpec { url, body, headers }
    }

    fn extract_text(&self, body: &serde_json::Value) -> String {
        body.pointer("/choices/0/message/content")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    }
}
