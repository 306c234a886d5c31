//! Fetch retry policy
//!
//! A failed adapter call may be retried at most once, immediately, and only
//! for transient failures; the call's own client timeout is the only
//! deadline. Anything that still fails is normalized to
//! `AgentError::SourceUnavailable` for the engine to absorb.

use std::future::Future;

use tracing::warn;

use meetmind_core::{AgentError, AgentResult, SourceKind};

/// Classify an adapter error message as transient (worth one retry).
///
/// Auth and request-shape failures will fail identically on retry, so only
/// transport-shaped failures qualify.
pub(crate) fn is_transient(message: &str) -> bool {
    let msg = message.to_lowercase();
    msg.contains("timeout")
        || msg.contains("timed out")
        || msg.contains("network")
        || msg.contains("connection")
        || msg.contains("socket")
        || msg.contains("429")
        || msg.contains("too many requests")
        || msg.contains("http 5")
}

/// Run a fetch attempt, retrying once on transient failure.
pub(crate) async fn fetch_with_retry<F, Fut>(source: SourceKind, op: F) -> AgentResult<Vec<String>>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<Vec<String>, String>>,
{
    match op().await {
        Ok(passages) => Ok(passages),
        Err(first) if is_transient(&first) => {
            warn!(source = %source, error = %first, "fetch failed, retrying once");
            op().await
                .map_err(|second| AgentError::source_unavailable(source, second))
        }
        Err(first) => Err(AgentError::source_unavailable(source, first)),
    }
}
