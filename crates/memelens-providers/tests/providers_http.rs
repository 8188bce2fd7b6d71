//! Analyzer behavior against local stub APIs.

use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use memelens_core::{AnalyzeError, ImagePayload, MemeAnalyzer};
use memelens_providers::{GeminiAnalyzer, OpenAiAnalyzer};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::net::SocketAddr;

fn payload() -> ImagePayload {
    ImagePayload {
        base64_data: "QUJD".to_string(),
        content_type: Some("image/jpeg".to_string()),
        file_name: "cat.jpg".to_string(),
    }
}

async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub");
    let addr = listener.local_addr().expect("stub addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve stub");
    });
    addr
}

#[tokio::test]
async fn openai_analyzer_parses_a_completion() {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(|headers: HeaderMap| async move {
            if headers.get("authorization").and_then(|v| v.to_str().ok())
                != Some("Bearer test-key")
            {
                return (StatusCode::UNAUTHORIZED, axum::Json(json!({})));
            }
            let content = json!({
                "explanation": "a surprised cat",
                "culturalContext": "cats are the internet",
                "confidence": 0.7,
            });
            (
                StatusCode::OK,
                axum::Json(json!({
                    "choices": [{ "message": { "content": content.to_string() } }],
                })),
            )
        }),
    );
    let addr = spawn(app).await;

    let analyzer = OpenAiAnalyzer::new("test-key".to_string())
        .with_base_url(format!("http://{addr}"));
    let analysis = analyzer
        .analyze(&payload(), "en", Some("https://example.com/cat.jpg"))
        .await
        .expect("analyze");

    assert_eq!(analysis.explanation, "a surprised cat");
    assert_eq!(
        analysis.cultural_context.as_deref(),
        Some("cats are the internet")
    );
    assert_eq!(analysis.confidence, 0.7);
}

#[tokio::test]
async fn openai_non_success_is_a_request_error() {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let addr = spawn(app).await;

    let analyzer =
        OpenAiAnalyzer::new("test-key".to_string()).with_base_url(format!("http://{addr}"));
    let err = analyzer
        .analyze(&payload(), "en", None)
        .await
        .expect_err("provider error");
    assert!(matches!(err, AnalyzeError::Request(_)));
}

#[tokio::test]
async fn gemini_analyzer_parses_a_generation() {
    let app = Router::new().route(
        "/v1beta/models/gemini-2.5-pro:generateContent",
        post(|| async {
            let content = json!({
                "explanation": "stonks guy going up",
                "confidence": 0.9,
            });
            axum::Json(json!({
                "candidates": [{
                    "content": { "parts": [{ "text": content.to_string() }] },
                }],
            }))
        }),
    );
    let addr = spawn(app).await;

    let analyzer =
        GeminiAnalyzer::new("test-key".to_string()).with_base_url(format!("http://{addr}"));
    let analysis = analyzer
        .analyze(&payload(), "en", None)
        .await
        .expect("analyze");

    assert_eq!(analysis.explanation, "stonks guy going up");
    assert_eq!(analysis.cultural_context, None);
    assert_eq!(analysis.confidence, 0.9);
}

#[tokio::test]
async fn gemini_empty_candidates_is_invalid_response() {
    let app = Router::new().route(
        "/v1beta/models/gemini-2.5-pro:generateContent",
        post(|| async { axum::Json(json!({ "candidates": [] })) }),
    );
    let addr = spawn(app).await;

    let analyzer =
        GeminiAnalyzer::new("test-key".to_string()).with_base_url(format!("http://{addr}"));
    let err = analyzer
        .analyze(&payload(), "en", None)
        .await
        .expect_err("empty response");
    let AnalyzeError::InvalidResponse(message) = err else {
        panic!("expected invalid response");
    };
    assert_eq!(message, "empty response from Gemini model");
}
