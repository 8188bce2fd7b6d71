//! API error type and response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::{error, warn};
use memelens_core::ExplainError;
use serde_json::json;

/// Errors surfaced at the HTTP boundary.
///
/// Every variant maps to a short human-readable message; internal detail is
/// logged server-side and never leaks into the response body.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed request shape or field.
    Validation {
        message: String,
        errors: Option<Vec<String>>,
    },
    /// Unknown record id.
    NotFound(String),
    /// Pipeline failure.
    Explain(ExplainError),
}

impl ApiError {
    /// A validation failure with just a message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            errors: None,
        }
    }

    /// A validation failure carrying field-level detail.
    pub fn validation_with_errors(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self::Validation {
            message: message.into(),
            errors: Some(errors),
        }
    }
}

impl From<ExplainError> for ApiError {
    fn from(err: ExplainError) -> Self {
        Self::Explain(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            ApiError::Validation { message, errors } => (StatusCode::BAD_REQUEST, message, errors),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message, None),
            ApiError::Explain(err) => match &err {
                ExplainError::Analyze(inner) => {
                    error!("meme analysis failed: {inner}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Failed to analyze meme. Please try again later.".to_string(),
                        None,
                    )
                }
                _ => {
                    warn!("explain request rejected: {err}");
                    (StatusCode::BAD_REQUEST, err.to_string(), None)
                }
            },
        };
        let mut body = json!({ "message": message });
        if let Some(errors) = errors {
            body["errors"] = json!(errors);
        }
        (status, Json(body)).into_response()
    }
}
