//! Meetmind Server
//!
//! HTTP service over the meetmind retrieval-escalation engine. A question
//! about a recorded meeting comes in, up to three evidence tiers are
//! consulted (private index, paper search, web search), retrieved passages
//! are graded for relevance, and a single generation call composes the
//! answer from the accepted evidence plus the meeting transcript.
//!
//! This crate owns configuration, provider wiring, and the HTTP surface;
//! the engine itself lives in `meetmind-agent`.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

// Re-export commonly used items
pub use config::Settings;
pub use error::{AppError, AppResult};
pub use routes::create_app;
pub use state::AppState;
