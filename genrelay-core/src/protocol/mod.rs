//! Protocol types shared between the relay surface and the provider layer

pub mod types;

pub use types::{GenerationRequest, GenerationResult, ProviderCallSpec, ProviderResponse};
