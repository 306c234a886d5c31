//! Application State
//!
//! Wires concrete providers into the orchestration engine from settings.
//! The pipeline is stateless across requests, so a single shared instance
//! serves every concurrent request without locking.

use std::sync::Arc;

use meetmind_agent::{EscalationPipeline, LlmAnswerGenerator, LlmRelevanceGrader};
use meetmind_evidence::{
    PaperSearchConfig, PaperSearchSource, VectorIndexConfig, VectorIndexSource, WebSearchConfig,
    WebSearchSource,
};
use meetmind_llm::{CompletionProvider, OllamaProvider, OpenAiProvider, ProviderConfig};

use crate::config::{LlmBackend, Settings};
use crate::error::AppResult;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<EscalationPipeline>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    /// Wrap an already-built pipeline (used by tests with stub providers).
    pub fn new(pipeline: Arc<EscalationPipeline>) -> Self {
        Self { pipeline }
    }

    /// Build the full production wiring from settings.
    pub fn from_settings(settings: &Settings) -> AppResult<Self> {
        let completion = build_completion_provider(settings);
        let grader = Arc::new(LlmRelevanceGrader::new(completion.clone()));
        let generator = Arc::new(LlmAnswerGenerator::new(completion));

        let primary = Arc::new(VectorIndexSource::new(VectorIndexConfig {
            base_url: settings.index.base_url.clone(),
            api_key: settings.index.api_key.clone(),
            top_k: settings.index.top_k,
            timeout_seconds: settings.index.timeout_seconds,
        }));

        let papers = Arc::new(PaperSearchSource::new(PaperSearchConfig {
            base_url: settings.papers.base_url.clone(),
            api_key: settings.papers.api_key.clone(),
            limit: settings.papers.limit,
            timeout_seconds: settings.papers.timeout_seconds,
        }));

        let web = Arc::new(
            WebSearchSource::new(WebSearchConfig {
                provider: settings.web.provider.clone(),
                api_key: settings.web.api_key.clone(),
                max_results: settings.web.max_results,
                timeout_seconds: settings.web.timeout_seconds,
            })
            .map_err(crate::error::AppError::config)?,
        );

        let pipeline = Arc::new(EscalationPipeline::new(
            primary, papers, web, grader, generator,
        ));

        Ok(Self::new(pipeline))
    }

    pub fn pipeline(&self) -> &EscalationPipeline {
        &self.pipeline
    }
}

fn build_completion_provider(settings: &Settings) -> Arc<dyn CompletionProvider> {
    let config = ProviderConfig {
        model: settings.llm.model.clone(),
        api_key: settings.llm.api_key.clone(),
        base_url: settings.llm.base_url.clone(),
        max_tokens: settings.llm.max_tokens,
        temperature: settings.llm.temperature,
        timeout_seconds: settings.llm.timeout_seconds,
    };

    match settings.llm.backend {
        LlmBackend::OpenAi => Arc::new(OpenAiProvider::new(config)),
        LlmBackend::Ollama => Arc::new(OllamaProvider::new(config)),
    }
}
