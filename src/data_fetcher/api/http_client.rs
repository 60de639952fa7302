//! HTTP client construction for the sports-data and text-generation providers.

use reqwest::Client;
use std::time::Duration;

/// Creates a reqwest client with a request timeout and a bounded idle pool.
///
/// Both providers get their own client: sports data uses the short HTTP
/// timeout, generation calls use the longer generation timeout.
pub fn create_http_client_with_timeout(timeout_seconds: u64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .pool_max_idle_per_host(crate::constants::HTTP_POOL_MAX_IDLE_PER_HOST)
        .build()
}

/// Creates an HTTP client for testing with default timeout
#[cfg(test)]
pub fn create_test_http_client() -> Client {
    create_http_client_with_timeout(crate::constants::DEFAULT_HTTP_TIMEOUT_SECONDS)
        .expect("Failed to create test HTTP client")
}
