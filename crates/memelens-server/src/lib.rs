//! HTTP API for MemeLens.
//!
//! Exposes the explain endpoint (JSON URL body or multipart upload) and the
//! read-only record endpoints over an injected [`memelens_core::ExplainService`].

mod error;
mod routes;
mod state;

pub use error::ApiError;
pub use routes::{MAX_UPLOAD_BYTES, router};
pub use state::AppState;
