//! Error types for the explain pipeline.

use crate::analyze::AnalyzeError;
use crate::fetch::FetchError;
use thiserror::Error;

/// Errors returned by the end-to-end explain operation.
///
/// Acquisition failures short-circuit the pipeline before any provider call.
#[derive(Debug, Error)]
pub enum ExplainError {
    /// Neither a URL nor file bytes were supplied.
    #[error("please provide either a meme URL or upload an image file")]
    MissingInput,
    /// Uploaded bytes failed the image signature check.
    #[error("invalid image file; please upload a valid image")]
    InvalidImage,
    /// Fetching the meme from its URL failed.
    #[error("failed to fetch meme from URL: {0}")]
    Fetch(#[from] FetchError),
    /// The AI provider call failed or returned unusable data.
    #[error("failed to analyze meme: {0}")]
    Analyze(#[from] AnalyzeError),
}
