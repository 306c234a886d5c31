//! HTTP Client Factory
//!
//! Builds reqwest clients with the per-call timeout carried by the client,
//! so every provider and adapter request has a deadline without per-request
//! plumbing.

use std::time::Duration;

/// Build a `reqwest::Client` with the given request timeout in seconds.
///
/// Connection establishment gets its own short deadline so an unreachable
/// host fails fast instead of consuming the whole request budget.
pub fn build_http_client(timeout_seconds: u64) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .connect_timeout(Duration::from_secs(5))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
