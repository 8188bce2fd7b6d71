use async_trait::async_trait;
use memelens_core::{AnalyzeError, ImagePayload, MemeAnalysis, MemeAnalyzer};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct FixedAnalyzer {
    analysis: MemeAnalysis,
}

impl FixedAnalyzer {
    pub fn new(explanation: impl Into<String>) -> Self {
        Self {
            analysis: MemeAnalysis {
                explanation: explanation.into(),
                cultural_context: None,
                confidence: 0.9,
            },
        }
    }

    pub fn with_analysis(analysis: MemeAnalysis) -> Self {
        Self { analysis }
    }
}

#[async_trait]
impl MemeAnalyzer for FixedAnalyzer {
    async fn analyze(
        &self,
        _payload: &ImagePayload,
        _language: &str,
        _meme_url: Option<&str>,
    ) -> Result<MemeAnalysis, AnalyzeError> {
        Ok(self.analysis.clone())
    }
}

#[derive(Debug, Clone)]
pub struct FailingAnalyzer {
    message: String,
}

impl FailingAnalyzer {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl MemeAnalyzer for FailingAnalyzer {
    async fn analyze(
        &self,
        _payload: &ImagePayload,
        _language: &str,
        _meme_url: Option<&str>,
    ) -> Result<MemeAnalysis, AnalyzeError> {
        Err(AnalyzeError::Request(self.message.clone()))
    }
}

/// A single recorded analyze call: file name, language, source URL.
pub type RecordedAnalysis = (String, String, Option<String>);

#[derive(Clone)]
pub struct RecordingAnalyzer {
    analysis: MemeAnalysis,
    calls: Arc<Mutex<Vec<RecordedAnalysis>>>,
}

impl RecordingAnalyzer {
    pub fn new(explanation: impl Into<String>) -> (Self, Arc<Mutex<Vec<RecordedAnalysis>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                analysis: MemeAnalysis {
                    explanation: explanation.into(),
                    cultural_context: None,
                    confidence: 0.9,
                },
                calls: calls.clone(),
            },
            calls,
        )
    }
}

#[async_trait]
impl MemeAnalyzer for RecordingAnalyzer {
    async fn analyze(
        &self,
        payload: &ImagePayload,
        language: &str,
        meme_url: Option<&str>,
    ) -> Result<MemeAnalysis, AnalyzeError> {
        self.calls.lock().push((
            payload.file_name.clone(),
            language.to_string(),
            meme_url.map(str::to_string),
        ));
        Ok(self.analysis.clone())
    }
}
