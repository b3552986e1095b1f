//! Common test utilities and helpers

use std::time::Duration;

use mgc::{Client, RetryConfig};
use serde_json::{json, Value};
use wiremock::MockServer;

/// API key sent by every test client
#[allow(dead_code)]
pub const TEST_API_KEY: &str = "test-api-key";

/// Retry policy that never sleeps long enough to matter
#[allow(dead_code)]
pub fn fast_retry(max_attempts: u32) -> RetryConfig {
    RetryConfig {
        max_attempts,
        initial_interval: Duration::from_millis(1),
        max_interval: Duration::from_millis(2),
        backoff_factor: 1.0,
    }
}

/// Client pointed at the mock server, retrying 3 times
#[allow(dead_code)]
pub fn test_client(server: &MockServer) -> Client {
    Client::builder()
        .api_key(TEST_API_KEY)
        .base_url(server.uri())
        .retry(fast_retry(3))
        .build()
        .expect("Failed to build client")
}

/// Client pointed at the mock server with a single attempt per request
#[allow(dead_code)]
pub fn no_retry_client(server: &MockServer) -> Client {
    Client::builder()
        .api_key(TEST_API_KEY)
        .base_url(server.uri())
        .retry(fast_retry(1))
        .build()
        .expect("Failed to build client")
}

/// `{"id": ...}` items numbered from `start`
#[allow(dead_code)]
pub fn numbered_items(prefix: &str, start: usize, count: usize) -> Vec<Value> {
    (start..start + count)
        .map(|n| json!({"id": format!("{prefix}-{n}"), "name": format!("{prefix} {n}")}))
        .collect()
}

/// Opt into SDK logs with `RUST_LOG=mgc=debug`
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
