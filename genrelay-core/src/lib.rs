//! GenRelay Core Library
//!
//! This crate provides the core functionality for the GenRelay text-generation
//! relay: provider-agnostic protocol types, adapters for the supported provider
//! families, a resilient HTTP caller with bounded retry, and error
//! classification for translating provider failures into client-facing
//! responses.

pub mod config;
pub mod http;
pub mod protocol;
pub mod providers;
pub mod relay;

pub use config::{ProviderSettings, RelayConfig, SecretString};
pub use protocol::{GenerationRequest, GenerationResult, ProviderCallSpec};
pub use providers::{ProviderAdapter, ProviderError, ProviderKind, RetryPolicy};
pub use relay::Relay;

/// Returns the version of the GenRelay core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
