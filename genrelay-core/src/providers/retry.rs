//! Retry policy and the resilient call loop
//!
//! Transient provider failures (429, 503, connectivity) are retried with
//! bounded exponential backoff. The provider's Retry-After hint takes
//! precedence over the computed backoff; either way the delay is clamped to
//! `max_delay_ms`. Delays are deterministic so the sequence is monotonically
//! non-decreasing across attempts.

use crate::providers::error::ProviderError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

/// Configuration for retry behavior. Process-wide constant, never mutated
/// at runtime; the attempt counter is local to each call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total number of attempts, including the initial one (≥ 1)
    pub max_attempts: u32,

    /// Backoff multiplier base (milliseconds)
    pub base_delay_ms: u64,

    /// Upper bound on any single delay (milliseconds)
    pub max_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        // 2s, 4s backoff between the three attempts, capped at 5s
        Self {
            max_attempts: 3,
            base_delay_ms: 1_000,
            max_delay_ms: 5_000,
        }
    }
}

impl RetryPolicy {
    /// Create a policy with a custom attempt budget.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            ..Default::default()
        }
    }

    /// Create a policy that gives up after the first failure.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }

    /// Delay to wait after the failed attempt with zero-based index
    /// `attempt`. Prefers the provider's Retry-After hint; falls back to
    /// exponential backoff `2^(attempt+1) * base_delay_ms`. Both paths are
    /// clamped to `max_delay_ms`.
    pub fn delay_for(&self, attempt: u32, error: &ProviderError) -> Duration {
        let millis = match error.retry_after() {
            Some(hint) => hint.as_millis() as u64,
            None => 2u64
                .saturating_pow(attempt.saturating_add(1))
                .saturating_mul(self.base_delay_ms),
        };
        Duration::from_millis(millis.min(self.max_delay_ms))
    }

    /// Whether another attempt should be made after the failed attempt with
    /// zero-based index `attempt`.
    pub fn should_retry(&self, error: &ProviderError, attempt: u32) -> bool {
        attempt + 1 < self.max_attempts && error.is_retryable()
    }
}

/// Run `operation` under `policy`, suspending the current task between
/// attempts. Returns the first success or the last error once attempts are
/// exhausted or the error is not retryable.
pub async fn execute<F, T, Fut>(policy: &RetryPolicy, mut operation: F) -> Result<T, ProviderError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, ProviderError>>,
{
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(error) => {
                if !policy.should_retry(&error, attempt) {
                    return Err(error);
                }

                let delay = policy.delay_for(attempt, &error);
                warn!(
                    attempt = attempt + 1,
                    max_attempts = policy.max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %error,
                    "transient provider failure, backing off before retry"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
