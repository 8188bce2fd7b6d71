//! Route handlers for the MemeLens API.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{DefaultBodyLimit, FromRequest, Multipart, Path, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use log::info;
use memelens_core::{ExplainError, MemeInput, MemeRecord, MemeSource, RecordId};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Upload size ceiling in bytes.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Build the API router over the injected state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/explain-meme", post(explain_meme))
        .route("/api/recent-memes", get(recent_memes))
        .route("/api/meme/{id}", get(meme_by_id))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

/// JSON body shape for URL-based requests.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExplainBody {
    meme_url: Option<String>,
    language: Option<String>,
}

/// Success body for the explain endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExplainResponse {
    id: RecordId,
    explanation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    cultural_context: Option<String>,
    language: String,
    confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    meme_url: Option<String>,
    file_name: String,
    meme_type: MemeSource,
}

impl From<MemeRecord> for ExplainResponse {
    fn from(record: MemeRecord) -> Self {
        Self {
            id: record.id,
            explanation: record.explanation,
            cultural_context: record.cultural_context,
            language: record.language,
            confidence: record.confidence,
            meme_url: record.meme_url,
            file_name: record.file_name,
            meme_type: record.source,
        }
    }
}

async fn explain_meme(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<ExplainResponse>, ApiError> {
    let (input, language) = extract_explain_request(request).await?;
    validate_language(&language)?;
    let input = input.ok_or(ApiError::Explain(ExplainError::MissingInput))?;
    let record = state.service.explain(input, &language).await?;
    Ok(Json(ExplainResponse::from(record)))
}

async fn recent_memes(State(state): State<AppState>) -> Json<Vec<MemeRecord>> {
    Json(state.store.recent(state.recent_limit))
}

async fn meme_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MemeRecord>, ApiError> {
    let id: RecordId = id.parse().map_err(|_| not_found())?;
    state.store.get(id).map(Json).ok_or_else(not_found)
}

fn not_found() -> ApiError {
    ApiError::NotFound("Meme explanation not found.".to_string())
}

/// Pull either input shape out of the request: a JSON body carrying a meme
/// URL, or a multipart form carrying the file plus a language field.
async fn extract_explain_request(
    request: Request,
) -> Result<(Option<MemeInput>, String), ApiError> {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"));

    if is_multipart {
        let multipart = Multipart::from_request(request, &())
            .await
            .map_err(invalid_request)?;
        extract_multipart(multipart).await
    } else {
        let Json(body): Json<ExplainBody> = Json::from_request(request, &())
            .await
            .map_err(invalid_request)?;
        let input = body
            .meme_url
            .filter(|meme_url| !meme_url.trim().is_empty())
            .map(MemeInput::Url);
        Ok((input, body.language.unwrap_or_default()))
    }
}

async fn extract_multipart(
    mut multipart: Multipart,
) -> Result<(Option<MemeInput>, String), ApiError> {
    let mut upload: Option<MemeInput> = None;
    let mut language = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(invalid_request)?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("memeFile") => {
                let file_name = field.file_name().map(str::to_string);
                let bytes = field.bytes().await.map_err(invalid_request)?;
                if bytes.len() > MAX_UPLOAD_BYTES {
                    return Err(ApiError::validation(
                        "Image file is too large. The limit is 10 MiB.",
                    ));
                }
                upload = Some(MemeInput::Upload {
                    data: bytes.to_vec(),
                    file_name,
                });
            }
            Some("language") => {
                language = field.text().await.map_err(invalid_request)?;
            }
            _ => {}
        }
    }
    Ok((upload, language))
}

fn invalid_request(err: impl std::fmt::Display) -> ApiError {
    ApiError::validation_with_errors("Invalid request data.", vec![err.to_string()])
}

fn validate_language(language: &str) -> Result<(), ApiError> {
    let len = language.chars().count();
    if !(2..=10).contains(&len) {
        return Err(ApiError::validation(
            "Language must be a 2-10 character code.",
        ));
    }
    Ok(())
}

/// Log method, path, status, and duration for API requests.
async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();
    let response = next.run(request).await;
    if path.starts_with("/api") {
        info!(
            "{} {} {} in {}ms",
            method,
            path,
            response.status().as_u16(),
            start.elapsed().as_millis()
        );
    }
    response
}
