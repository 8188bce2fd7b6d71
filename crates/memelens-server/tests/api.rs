//! HTTP API tests with mock capabilities.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use memelens_core::{ExplainService, MemeAnalyzer, MemeFetcher, MemoryStore};
use memelens_server::{AppState, router};
use memelens_test_utils::{
    FailingAnalyzer, FailingFetcher, FixedAnalyzer, FixedFetcher, RecordingAnalyzer,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
const BOUNDARY: &str = "memelens-test-boundary";

fn app(fetcher: Arc<dyn MemeFetcher>, analyzer: Arc<dyn MemeAnalyzer>) -> Router {
    let store = Arc::new(MemoryStore::new());
    let service = ExplainService::new(fetcher, analyzer, store);
    router(AppState::new(service, 9))
}

fn json_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/explain-meme")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn multipart_request(file: Option<(&str, &[u8])>, language: Option<&str>) -> Request<Body> {
    let mut body = Vec::new();
    if let Some((file_name, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"memeFile\"; \
                 filename=\"{file_name}\"\r\nContent-Type: image/jpeg\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    if let Some(language) = language {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; \
                 name=\"language\"\r\n\r\n{language}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/explain-meme")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("request")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn json_url_request_returns_an_explanation() {
    let app = app(
        Arc::new(FixedFetcher::jpeg("cat.jpg")),
        Arc::new(FixedAnalyzer::new("a cat looking surprised")),
    );

    let response = app
        .oneshot(json_request(json!({
            "memeUrl": "https://example.com/cat.jpg",
            "language": "en",
        })))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["explanation"], "a cat looking surprised");
    assert_eq!(body["memeType"], "url");
    assert_eq!(body["fileName"], "cat.jpg");
    assert_eq!(body["memeUrl"], "https://example.com/cat.jpg");
    assert_eq!(body["language"], "en");
    assert!(body["id"].as_str().is_some());
}

#[tokio::test]
async fn multipart_upload_returns_an_explanation() {
    let app = app(
        Arc::new(FixedFetcher::jpeg("unused.jpg")),
        Arc::new(FixedAnalyzer::new("uploaded meme explained")),
    );

    let response = app
        .oneshot(multipart_request(Some(("cat.jpg", JPEG)), Some("es")))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["explanation"], "uploaded meme explained");
    assert_eq!(body["memeType"], "upload");
    assert_eq!(body["fileName"], "cat.jpg");
    assert_eq!(body["language"], "es");
    assert!(body.get("memeUrl").is_none());
}

#[tokio::test]
async fn renamed_text_file_is_rejected_before_any_provider_call() {
    let (analyzer, calls) = RecordingAnalyzer::new("unused");
    let app = app(
        Arc::new(FixedFetcher::jpeg("unused.jpg")),
        Arc::new(analyzer),
    );

    let response = app
        .oneshot(multipart_request(
            Some(("totally-a-meme.jpg", b"fifty bytes of plain text, not an image at all!!")),
            Some("en"),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "invalid image file; please upload a valid image");
    assert_eq!(calls.lock().len(), 0);
}

#[tokio::test]
async fn missing_input_is_a_400() {
    let app = app(
        Arc::new(FixedFetcher::jpeg("unused.jpg")),
        Arc::new(FixedAnalyzer::new("unused")),
    );

    let response = app
        .oneshot(json_request(json!({ "language": "en" })))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(
        body["message"],
        "please provide either a meme URL or upload an image file"
    );
}

#[tokio::test]
async fn out_of_range_language_is_a_400() {
    let app = app(
        Arc::new(FixedFetcher::jpeg("unused.jpg")),
        Arc::new(FixedAnalyzer::new("unused")),
    );

    let response = app
        .oneshot(json_request(json!({
            "memeUrl": "https://example.com/cat.jpg",
            "language": "e",
        })))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Language must be a 2-10 character code.");
}

#[tokio::test]
async fn fetch_failure_surfaces_as_a_400_with_the_status() {
    let app = app(
        Arc::new(FailingFetcher::status(403)),
        Arc::new(FixedAnalyzer::new("unused")),
    );

    let response = app
        .oneshot(json_request(json!({
            "memeUrl": "https://example.com/cat.jpg",
            "language": "en",
        })))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    let message = body["message"].as_str().expect("message");
    assert!(message.starts_with("failed to fetch meme from URL:"));
    assert!(message.contains("403"));
}

#[tokio::test]
async fn provider_failure_is_a_500_without_detail() {
    let app = app(
        Arc::new(FixedFetcher::jpeg("cat.jpg")),
        Arc::new(FailingAnalyzer::new("upstream exploded spectacularly")),
    );

    let response = app
        .oneshot(json_request(json!({
            "memeUrl": "https://example.com/cat.jpg",
            "language": "en",
        })))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(
        body["message"],
        "Failed to analyze meme. Please try again later."
    );
}

#[tokio::test]
async fn unknown_and_malformed_ids_are_404() {
    let app = app(
        Arc::new(FixedFetcher::jpeg("unused.jpg")),
        Arc::new(FixedAnalyzer::new("unused")),
    );

    let unknown = format!("/api/meme/{}", uuid::Uuid::new_v4());
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(unknown)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/meme/not-a-uuid")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Meme explanation not found.");
}

#[tokio::test]
async fn recent_list_returns_newest_first() {
    let app = app(
        Arc::new(FixedFetcher::jpeg("cat.jpg")),
        Arc::new(FixedAnalyzer::new("explained")),
    );

    let first = app
        .clone()
        .oneshot(json_request(json!({
            "memeUrl": "https://example.com/first.jpg",
            "language": "en",
        })))
        .await
        .expect("first");
    assert_eq!(first.status(), StatusCode::OK);
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = app
        .clone()
        .oneshot(multipart_request(Some(("second.jpg", JPEG)), Some("fr")))
        .await
        .expect("second");
    assert_eq!(second.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/recent-memes")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let records = body.as_array().expect("array");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["fileName"], "second.jpg");
    assert_eq!(records[0]["memeType"], "upload");
    assert_eq!(records[1]["fileName"], "first.jpg");
    assert_eq!(records[1]["memeType"], "url");
    assert_ne!(records[0]["id"], records[1]["id"]);
}

#[tokio::test]
async fn fetched_record_is_retrievable_by_id() {
    let app = app(
        Arc::new(FixedFetcher::jpeg("cat.jpg")),
        Arc::new(FixedAnalyzer::new("explained")),
    );

    let response = app
        .clone()
        .oneshot(json_request(json!({
            "memeUrl": "https://example.com/cat.jpg",
            "language": "en",
        })))
        .await
        .expect("explain");
    let created = body_json(response).await;
    let id = created["id"].as_str().expect("id").to_string();

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/meme/{id}"))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["explanation"], "explained");
}
