//! Service Configuration
//!
//! Environment-backed settings, loaded once at startup. A `.env` file is
//! honored when present (see `main`). Anything malformed or missing that
//! the service cannot run without is a startup configuration error.

use std::env;
use std::str::FromStr;

use crate::error::{AppError, AppResult};

/// Which completion backend the grader and generator use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmBackend {
    OpenAi,
    Ollama,
}

impl FromStr for LlmBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(LlmBackend::OpenAi),
            "ollama" => Ok(LlmBackend::Ollama),
            other => Err(format!(
                "unknown LLM backend '{}', expected openai or ollama",
                other
            )),
        }
    }
}

/// Completion provider settings
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub backend: LlmBackend,
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_seconds: u64,
}

/// Private document index settings
#[derive(Debug, Clone)]
pub struct IndexSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub top_k: u32,
    pub timeout_seconds: u64,
}

/// Paper search settings
#[derive(Debug, Clone)]
pub struct PaperSettings {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub limit: u32,
    pub timeout_seconds: u64,
}

/// Web search settings
#[derive(Debug, Clone)]
pub struct WebSettings {
    pub provider: String,
    pub api_key: Option<String>,
    pub max_results: u32,
    pub timeout_seconds: u64,
}

/// All service settings
#[derive(Debug, Clone)]
pub struct Settings {
    /// Listen address, e.g. "0.0.0.0:8080"
    pub bind_addr: String,
    pub llm: LlmSettings,
    pub index: IndexSettings,
    pub papers: PaperSettings,
    pub web: WebSettings,
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_string())
}

fn env_parse<T: FromStr>(key: &str, default: T) -> AppResult<T> {
    match env_opt(key) {
        Some(raw) => raw
            .parse()
            .map_err(|_| AppError::config(format!("{} has an invalid value: {:?}", key, raw))),
        None => Ok(default),
    }
}

impl Settings {
    /// Load settings from the process environment.
    pub fn from_env() -> AppResult<Self> {
        let backend: LlmBackend = env_or("MEETMIND_LLM_BACKEND", "openai")
            .parse()
            .map_err(AppError::config)?;

        let api_key = env_opt("OPENAI_API_KEY");
        if backend == LlmBackend::OpenAi && api_key.is_none() {
            return Err(AppError::config(
                "OPENAI_API_KEY must be set when MEETMIND_LLM_BACKEND is openai",
            ));
        }

        let default_model = match backend {
            LlmBackend::OpenAi => "gpt-4o-mini",
            LlmBackend::Ollama => "llama3.1:8b",
        };

        let llm = LlmSettings {
            backend,
            model: env_or("MEETMIND_LLM_MODEL", default_model),
            api_key,
            base_url: env_opt("MEETMIND_LLM_BASE_URL"),
            max_tokens: env_parse("MEETMIND_LLM_MAX_TOKENS", 1024)?,
            temperature: env_parse("MEETMIND_LLM_TEMPERATURE", 0.0)?,
            timeout_seconds: env_parse("MEETMIND_LLM_TIMEOUT_SECONDS", 60)?,
        };

        let index = IndexSettings {
            base_url: env_opt("MEETMIND_INDEX_URL")
                .ok_or_else(|| AppError::config("MEETMIND_INDEX_URL is not set"))?,
            api_key: env_opt("MEETMIND_INDEX_API_KEY"),
            top_k: env_parse("MEETMIND_INDEX_TOP_K", 5)?,
            timeout_seconds: env_parse("MEETMIND_INDEX_TIMEOUT_SECONDS", 10)?,
        };

        let papers = PaperSettings {
            base_url: env_opt("MEETMIND_PAPER_URL"),
            api_key: env_opt("MEETMIND_PAPER_API_KEY"),
            limit: env_parse("MEETMIND_PAPER_LIMIT", 5)?,
            timeout_seconds: env_parse("MEETMIND_PAPER_TIMEOUT_SECONDS", 15)?,
        };

        let web = WebSettings {
            provider: env_or("MEETMIND_WEB_PROVIDER", "duckduckgo"),
            // TAVILY_API_KEY is the historical name; the generic one wins.
            api_key: env_opt("MEETMIND_WEB_API_KEY").or_else(|| env_opt("TAVILY_API_KEY")),
            max_results: env_parse("MEETMIND_WEB_MAX_RESULTS", 5)?,
            timeout_seconds: env_parse("MEETMIND_WEB_TIMEOUT_SECONDS", 15)?,
        };

        Ok(Self {
            bind_addr: env_or("MEETMIND_ADDR", "0.0.0.0:8080"),
            llm,
            index,
            papers,
            web,
        })
    }
}
