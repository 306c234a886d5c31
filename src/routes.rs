//! HTTP API
//!
//! The request-handling layer over the orchestration engine:
//!
//! - `POST /chat/query` - answer a question about the recorded meeting
//! - `GET  /health`     - liveness probe
//!
//! Persistence of query/answer/trace is the caller's concern; this layer
//! only shapes the pipeline outcome into a response.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::info;

use meetmind_agent::{QueryRequest, StageId};
use meetmind_core::SourceKind;

use crate::error::AppError;
use crate::state::AppState;

/// Build the service router.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/chat/query", post(process_query))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// A question about the recorded meeting.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequestDto {
    pub prompt: String,
    /// Transcript of the most recent meeting, if available.
    #[serde(default)]
    pub transcript: Option<String>,
}

/// The answer plus the observability payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponseDto {
    pub answer: String,
    /// Pipeline stages executed, in order.
    pub steps: Vec<StageId>,
    /// Evidence tiers consulted, in tier order.
    pub sources_consulted: Vec<SourceKind>,
    /// Accepted passages the answer was generated from.
    pub references: Vec<String>,
    pub answered_at: String,
}

async fn process_query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequestDto>,
) -> Result<Json<QueryResponseDto>, AppError> {
    if request.prompt.trim().is_empty() {
        return Err(AppError::validation("prompt must not be empty"));
    }

    let mut query = QueryRequest::new(request.prompt);
    if let Some(transcript) = request.transcript {
        query = query.with_side_context(transcript);
    }

    let outcome = state.pipeline().run(query).await?;
    info!(
        steps = outcome.trace.len(),
        references = outcome.evidence.len(),
        "query answered"
    );

    Ok(Json(QueryResponseDto {
        answer: outcome.answer,
        steps: outcome.trace,
        sources_consulted: outcome.sources_consulted,
        references: outcome.evidence,
        answered_at: Utc::now().to_rfc3339(),
    }))
}

async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}
