//! End-to-end explain pipeline.

use crate::analyze::MemeAnalyzer;
use crate::error::ExplainError;
use crate::fetch::MemeFetcher;
use crate::image;
use crate::store::ExplanationStore;
use crate::types::{ImagePayload, MemeInput, MemeRecord, MemeSource, NewMemeRecord};
use base64::{Engine as _, engine::general_purpose};
use log::{debug, info};
use std::sync::Arc;

/// Default display name for uploads without an original name.
const DEFAULT_UPLOAD_NAME: &str = "uploaded-meme.jpg";

/// Drives a single explain request: validate or fetch the input, hand the
/// payload to the analyzer, and store the completed record.
///
/// A single linear sequence; there are no intermediate persisted states and
/// no retry semantics.
#[derive(Clone)]
pub struct ExplainService {
    fetcher: Arc<dyn MemeFetcher>,
    analyzer: Arc<dyn MemeAnalyzer>,
    store: Arc<dyn ExplanationStore>,
}

impl ExplainService {
    /// Create a service from injected capabilities.
    pub fn new(
        fetcher: Arc<dyn MemeFetcher>,
        analyzer: Arc<dyn MemeAnalyzer>,
        store: Arc<dyn ExplanationStore>,
    ) -> Self {
        Self {
            fetcher,
            analyzer,
            store,
        }
    }

    /// Handle to the shared explanation store.
    pub fn store(&self) -> Arc<dyn ExplanationStore> {
        self.store.clone()
    }

    /// Explain a meme and store the result.
    pub async fn explain(
        &self,
        input: MemeInput,
        language: &str,
    ) -> Result<MemeRecord, ExplainError> {
        let (payload, meme_url) = self.acquire(input).await?;
        debug!(
            "analyzing meme (file_name={}, language={}, from_url={})",
            payload.file_name,
            language,
            meme_url.is_some()
        );
        let analysis = self
            .analyzer
            .analyze(&payload, language, meme_url.as_deref())
            .await?;

        let source = if meme_url.is_some() {
            MemeSource::Url
        } else {
            MemeSource::Upload
        };
        let record = self.store.insert(NewMemeRecord {
            meme_url,
            source,
            file_name: payload.file_name,
            language: language.to_string(),
            explanation: analysis.explanation,
            cultural_context: analysis.cultural_context,
            confidence: analysis.confidence,
        });
        info!(
            "explained meme (id={}, source={})",
            record.id,
            record.source.as_str()
        );
        Ok(record)
    }

    /// Normalize the input into a validated payload plus the source URL.
    async fn acquire(
        &self,
        input: MemeInput,
    ) -> Result<(ImagePayload, Option<String>), ExplainError> {
        match input {
            MemeInput::Upload { data, file_name } => {
                if !image::is_valid_image(&data) {
                    return Err(ExplainError::InvalidImage);
                }
                let payload = ImagePayload {
                    base64_data: general_purpose::STANDARD.encode(&data),
                    content_type: None,
                    file_name: file_name.unwrap_or_else(|| DEFAULT_UPLOAD_NAME.to_string()),
                };
                Ok((payload, None))
            }
            MemeInput::Url(url) => {
                let payload = self.fetcher.fetch(&url).await?;
                Ok((payload, Some(url)))
            }
        }
    }
}
