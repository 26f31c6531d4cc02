//! Provider abstraction layer
//!
//! This module implements the provider-family abstraction: each supported
//! family knows how to translate a provider-agnostic request into its own
//! wire shape and how to pull the generated text back out of its response.
//! The family is selected once at startup from configuration; nothing in the
//! call path branches on provider identity.

pub mod adapter;
pub mod error;
pub mod gemini;
pub mod groq;
pub mod retry;

pub use adapter::{ProviderAdapter, ProviderKind};
pub use error::{ProviderError, ProviderResult};
pub use retry::RetryPolicy;

// Re-export concrete adapters
pub use gemini::GeminiAdapter;
pub use groq::GroqAdapter;
