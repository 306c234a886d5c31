//! HTTP API Integration Tests
//!
//! Exercises the router with stub-backed pipelines via
//! `tower::ServiceExt::oneshot`; no listener is bound.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::util::ServiceExt;

use meetmind_core::SourceKind;
use meetmind_server::{create_app, AppState};

use crate::stubs::{engine, RecordingGenerator, ScriptedSource};

fn stub_state(generator: std::sync::Arc<RecordingGenerator>) -> AppState {
    let pipeline = engine(
        ScriptedSource::returning(SourceKind::Primary, vec!["alpha", "beta"]),
        ScriptedSource::returning(SourceKind::Papers, vec!["never fetched"]),
        ScriptedSource::returning(SourceKind::Web, vec!["never fetched"]),
        generator,
    );
    AppState::new(std::sync::Arc::new(pipeline))
}

fn query_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/chat/query")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_query_happy_path() {
    let app = create_app(stub_state(RecordingGenerator::ok()));

    let response = app
        .oneshot(query_request(serde_json::json!({
            "prompt": "what was decided about the budget?",
            "transcript": "we argued about the budget",
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;

    assert_eq!(body["answer"], "answer[alpha | beta]");
    let steps: Vec<String> = body["steps"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s.as_str().unwrap().to_string())
        .collect();
    assert_eq!(steps, vec!["retrieve_primary", "grade_primary", "generate"]);
    assert_eq!(body["sourcesConsulted"][0], "primary");
    assert_eq!(body["references"].as_array().unwrap().len(), 2);
    assert!(body["answeredAt"].as_str().is_some());
}

#[tokio::test]
async fn test_query_without_transcript() {
    let generator = RecordingGenerator::ok();
    let app = create_app(stub_state(generator.clone()));

    let response = app
        .oneshot(query_request(serde_json::json!({ "prompt": "anything?" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        generator.seen_side_context.lock().unwrap().clone().unwrap(),
        None
    );
}

#[tokio::test]
async fn test_blank_prompt_rejected() {
    let app = create_app(stub_state(RecordingGenerator::ok()));

    let response = app
        .oneshot(query_request(serde_json::json!({ "prompt": "   " })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("prompt"));
}

#[tokio::test]
async fn test_generation_failure_maps_to_bad_gateway() {
    let app = create_app(stub_state(RecordingGenerator::failing()));

    let response = app
        .oneshot(query_request(serde_json::json!({ "prompt": "doomed" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = response_json(response).await;
    // No partial answer leaks out, only the terminal error.
    assert!(body.get("answer").is_none());
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("answer generation failed"));
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_app(stub_state(RecordingGenerator::ok()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "ok");
}
