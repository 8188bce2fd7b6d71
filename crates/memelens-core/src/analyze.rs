//! Analyzer capability interface.

use crate::types::ImagePayload;
use async_trait::async_trait;
use thiserror::Error;

/// Errors returned by a meme analyzer.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The provider call failed (network, auth, non-success status).
    #[error("provider request failed: {0}")]
    Request(String),
    /// The provider answered but the payload was unusable.
    #[error("provider returned unusable data: {0}")]
    InvalidResponse(String),
}

/// Result of analyzing a single meme.
#[derive(Debug, Clone, PartialEq)]
pub struct MemeAnalysis {
    /// Explanation text in the requested language.
    pub explanation: String,
    /// Optional supplementary cultural context.
    pub cultural_context: Option<String>,
    /// Provider-reported confidence in [0, 1].
    pub confidence: f64,
}

/// Analysis capability over a validated image payload.
///
/// Implementations wrap one concrete AI provider; the pipeline treats them
/// interchangeably.
#[async_trait]
pub trait MemeAnalyzer: Send + Sync {
    /// Explain the meme in the requested language.
    ///
    /// `meme_url` is the original source URL when the meme was fetched rather
    /// than uploaded; providers may include it as context.
    async fn analyze(
        &self,
        payload: &ImagePayload,
        language: &str,
        meme_url: Option<&str>,
    ) -> Result<MemeAnalysis, AnalyzeError>;
}
