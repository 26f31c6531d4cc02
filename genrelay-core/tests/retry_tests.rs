//! Tests for the retry policy and resilient call loop

use async_trait::async_trait;
use genrelay_core::http::CallExecutor;
use genrelay_core::protocol::{ProviderCallSpec, ProviderResponse};
use genrelay_core::providers::{retry, ProviderError, RetryPolicy};
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Executor that fails a scripted number of times before succeeding.
struct ScriptedExecutor {
    calls: AtomicU32,
    failures: u32,
    error: fn() -> ProviderError,
}

impl ScriptedExecutor {
    fn new(failures: u32, error: fn() -> ProviderError) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicU32::new(0),
            failures,
            error,
        })
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CallExecutor for ScriptedExecutor {
    async fn execute(&self, _spec: &ProviderCallSpec) -> Result<ProviderResponse, ProviderError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            Err((self.error)())
        } else {
            Ok(ProviderResponse {
                status: 200,
                body: json!({ "ok": true }),
            })
        }
    }
}

fn spec() -> ProviderCallSpec {
    ProviderCallSpec {
        url: "http://localhost/unused".to_string(),
        body: json!({}),
        headers: HashMap::new(),
    }
}

fn rate_limited() -> ProviderError {
    ProviderError::RateLimited {
        message: "rate limited".into(),
        retry_after_secs: None,
        details: None,
    }
}

fn unreachable() -> ProviderError {
    ProviderError::Network {
        message: "connection refused".into(),
    }
}

fn tiny_policy(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        base_delay_ms: 1,
        max_delay_ms: 2,
    }
}

#[tokio::test]
async fn always_rate_limited_makes_exactly_max_attempts() {
    let executor = ScriptedExecutor::new(u32::MAX, rate_limited);
    let spec = spec();

    let result = retry::execute(&tiny_policy(3), || executor.execute(&spec)).await;

    assert!(matches!(result, Err(ProviderError::RateLimited { .. })));
    assert_eq!(executor.calls(), 3);
}

#[tokio::test]
async fn transient_failures_then_success_recovers() {
    let executor = ScriptedExecutor::new(2, rate_limited);
    let spec = spec();

    let response = retry::execute(&tiny_policy(3), || executor.execute(&spec))
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(executor.calls(), 3);
}

#[tokio::test]
async fn authentication_failure_is_not_retried() {
    let executor = ScriptedExecutor::new(u32::MAX, || ProviderError::Authentication {
        message: "bad key".into(),
        details: None,
    });
    let spec = spec();

    let result = retry::execute(&tiny_policy(5), || executor.execute(&spec)).await;

    assert!(matches!(result, Err(ProviderError::Authentication { .. })));
    assert_eq!(executor.calls(), 1);
}

#[tokio::test]
async fn connectivity_failure_retried_like_transient() {
    let executor = ScriptedExecutor::new(1, unreachable);
    let spec = spec();

    let response = retry::execute(&tiny_policy(3), || executor.execute(&spec))
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(executor.calls(), 2);
}

#[tokio::test]
async fn connectivity_failure_exhaustion_reports_unreachable() {
    let executor = ScriptedExecutor::new(u32::MAX, unreachable);
    let spec = spec();

    let err = retry::execute(&tiny_policy(2), || executor.execute(&spec))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Network { .. }));
    assert_eq!(err.http_status(), 503);
    assert_eq!(executor.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn backoff_suspensions_follow_the_policy() {
    // With paused time the sleeps auto-advance the virtual clock, so the
    // elapsed time measures exactly the suspensions the loop requested.
    let policy = RetryPolicy {
        max_attempts: 3,
        base_delay_ms: 1_000,
        max_delay_ms: 5_000,
    };
    let executor = ScriptedExecutor::new(2, rate_limited);
    let spec = spec();

    let start = tokio::time::Instant::now();
    retry::execute(&policy, || executor.execute(&spec))
        .await
        .unwrap();

    // 2s after the first failure, 4s after the second
    assert_eq!(start.elapsed().as_millis(), 6_000);
}

#[tokio::test(start_paused = true)]
async fn retry_after_hint_overrides_backoff() {
    let policy = RetryPolicy::default();
    let executor = ScriptedExecutor::new(1, || ProviderError::RateLimited {
        message: "rate limited".into(),
        retry_after_secs: Some(1),
        details: None,
    });
    let spec = spec();

    let start = tokio::time::Instant::now();
    retry::execute(&policy, || executor.execute(&spec))
        .await
        .unwrap();

    // Hinted 1s instead of the computed 2s
    assert_eq!(start.elapsed().as_millis(), 1_000);
}
