//! Outbound HTTP client shared by provider integrations.

use std::time::Duration;

/// Builds the client used for CAPTCHA and Safe Browsing calls.
///
/// Calls are made inline while a request waits, so every call is bounded by
/// `timeout_secs`.
pub fn build_client(timeout_secs: u64) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}
