//! Google Gemini adapter
//!
//! Targets the `models/{model}:generateContent` endpoint. Gemini
//! authenticates with the API key as a query parameter rather than a header,
//! takes the system instruction as a dedicated top-level field, and signals
//! structured output through `generationConfig.responseMimeType`.

use crate::config::ProviderSettings;
use crate::protocol::{GenerationRequest, ProviderCallSpec};
use crate::providers::adapter::ProviderAdapter;
use serde_json::json;
use std::collections::HashMap;
use url::Url;

/// Adapter for the Gemini generateContent API.
pub struct GeminiAdapter;

impl GeminiAdapter {
    pub fn new() -> Self {
        Self
    }

    fn endpoint(&self, settings: &ProviderSettings) -> String {
        let raw = format!(
            "{}/models/{}:generateContent",
            settings.base_url.trim_end_matches('/'),
            settings.model
        );
        match Url::parse(&raw) {
            Ok(mut url) => {
                url.query_pairs_mut()
                    .append_pair("key", settings.api_key.expose_secret());
                url.into()
            }
            // Translation stays total even for an unparsable base override
            Err(_) => format!("{}?key={}", raw, settings.api_key.expose_secret()),
        }
    }
}

impl Default for GeminiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderAdapter for GeminiAdapter {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn default_base_url(&self) -> &'static str {
        "https://generativelanguage.googleapis.com/v1beta"
    }

    fn default_model(&self) -> &'static str {
        "gemini-2.0-flash"
    }

    fn build_call(
        &self,
        request: &GenerationRequest,
        settings: &ProviderSettings,
    ) -> ProviderCallSpec {
        let mut body = json!({
            "contents": [
                { "role": "user", "parts": [ { "text": request.prompt } ] },
            ],
        });

        if let Some(instruction) = &request.system_instruction {
            body["systemInstruction"] = json!({ "parts": [ { "text": instruction } ] });
        }

        if request.json_mode {
            body["generationConfig"] = json!({ "responseMimeType": "application/json" });
        }

        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        ProviderCallSpec {
            url: self.endpoint(settings),
            body,
            headers,
        }
    }

    fn extract_text(&self, body: &serde_json::Value) -> String {
        body.pointer("/candidates/0/content/parts/0/text")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    }
}
