//! Meetmind LLM
//!
//! Provides a unified interface for the opaque completion service the
//! pipeline's grader and generator call:
//! - OpenAI (and any OpenAI-compatible endpoint)
//! - Ollama (local inference)
//!
//! Also includes the HTTP client factory shared by the providers.

pub mod http_client;
pub mod ollama;
pub mod openai;
pub mod provider;
pub mod types;

// Re-export main types
pub use http_client::build_http_client;
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;
pub use provider::CompletionProvider;
pub use types::*;
