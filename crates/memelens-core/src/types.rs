//! Core data types shared across the explain pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a stored explanation.
pub type RecordId = Uuid;

/// Where a meme came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MemeSource {
    /// Fetched from a direct image URL.
    Url,
    /// Uploaded as raw file bytes.
    Upload,
}

impl MemeSource {
    /// Return the source as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            MemeSource::Url => "url",
            MemeSource::Upload => "upload",
        }
    }
}

/// A stored meme explanation. Immutable after creation.
///
/// Invariant: `source` is [`MemeSource::Url`] iff `meme_url` is present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MemeRecord {
    /// Record identifier, assigned at creation.
    pub id: RecordId,
    /// Source URL, present only for URL-sourced memes.
    pub meme_url: Option<String>,
    /// How the meme entered the system.
    #[serde(rename = "memeType")]
    pub source: MemeSource,
    /// Display name derived from the URL path or the upload's name.
    pub file_name: String,
    /// Requested explanation language code.
    pub language: String,
    /// The explanation text. Never empty.
    pub explanation: String,
    /// Optional supplementary cultural context.
    pub cultural_context: Option<String>,
    /// Provider-reported confidence, clamped to [0, 1].
    pub confidence: f64,
    /// Creation timestamp, used only for recency ordering.
    pub created_at: DateTime<Utc>,
}

/// Explanation fields supplied by the pipeline; the store assigns identity.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMemeRecord {
    /// Source URL, present only for URL-sourced memes.
    pub meme_url: Option<String>,
    /// How the meme entered the system.
    pub source: MemeSource,
    /// Display name for the meme.
    pub file_name: String,
    /// Requested explanation language code.
    pub language: String,
    /// The explanation text.
    pub explanation: String,
    /// Optional supplementary cultural context.
    pub cultural_context: Option<String>,
    /// Provider-reported confidence, clamped on insert.
    pub confidence: f64,
}

/// Normalized image payload handed to the analyzer.
///
/// Invariant: the decoded `base64_data` begins with a recognized image
/// signature by the time a payload leaves the acquisition step.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePayload {
    /// Base64-encoded image bytes.
    pub base64_data: String,
    /// MIME type as reported by the fetch, when URL-sourced.
    pub content_type: Option<String>,
    /// Resolved display name.
    pub file_name: String,
}

/// The two mutually exclusive input shapes accepted by the pipeline.
#[derive(Debug, Clone)]
pub enum MemeInput {
    /// A direct image URL to fetch.
    Url(String),
    /// Raw uploaded bytes plus the upload's original name, if any.
    Upload {
        data: Vec<u8>,
        file_name: Option<String>,
    },
}
