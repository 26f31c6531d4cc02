//! Configuration error types

use thiserror::Error;

/// Errors raised while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {message}")]
    Invalid { var: String, message: String },
}
