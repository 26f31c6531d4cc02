//! HTTP layer for outbound provider calls
//!
//! Handles connection pooling, the network-vs-HTTP-error distinction, and
//! the mapping of provider failure statuses to classified errors.

pub mod client;
pub mod error;

pub use client::{CallExecutor, HttpClient};
pub use error::map_status;
