//! Gemini generateContent analyzer.

use crate::language;
use crate::prompt;
use crate::response;
use async_trait::async_trait;
use log::{debug, info};
use memelens_core::{AnalyzeError, ImagePayload, MemeAnalysis, MemeAnalyzer};
use serde::Deserialize;
use serde_json::{Value, json};

/// Default API base URL.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Default multimodal model.
const DEFAULT_MODEL: &str = "gemini-2.5-pro";
/// MIME type assumed when the payload has none (uploads).
const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// Analyzer backed by the Gemini generateContent API.
pub struct GeminiAnalyzer {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiAnalyzer {
    /// Create an analyzer with the default model and endpoint.
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the API base URL (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn request_body(&self, payload: &ImagePayload, language: &str, meme_url: Option<&str>) -> Value {
        let target = language::language_name(language);
        let mime_type = payload
            .content_type
            .as_deref()
            .unwrap_or(DEFAULT_MIME_TYPE);
        json!({
            "systemInstruction": {
                "parts": [{ "text": system_prompt(language) }],
            },
            "contents": [{
                "parts": [
                    {
                        "inlineData": {
                            "mimeType": mime_type,
                            "data": payload.base64_data,
                        },
                    },
                    { "text": prompt::user_text(target, meme_url) },
                ],
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "object",
                    "properties": {
                        "explanation": { "type": "string" },
                        "culturalContext": { "type": "string" },
                        "confidence": { "type": "number" },
                    },
                    "required": ["explanation", "confidence"],
                },
            },
        })
    }
}

/// System prompt asking for a brief JSON-shaped explanation.
fn system_prompt(language: &str) -> String {
    let target = language::language_name(language);
    let hinglish = if language == language::HINGLISH {
        format!("{}\n\n", prompt::HINGLISH_INSTRUCTION)
    } else {
        String::new()
    };
    format!(
        "You are an expert meme analyst who understands internet culture, humor, and memes \
         across different platforms and cultures. Analyze the provided meme image and explain \
         it in {target}.\n\n\
         {hinglish}\
         Your response must be in JSON format with the following structure:\n\
         {{\n\
         \x20 \"explanation\": \"A brief, clear explanation of the meme in {target}. Keep it \
         concise - 2-3 sentences maximum. Explain the joke and why it's funny in simple \
         terms.\",\n\
         \x20 \"culturalContext\": \"Optional brief context about cultural references if \
         needed. Keep it short - 1-2 sentences.\",\n\
         \x20 \"confidence\": \"A number between 0 and 1 indicating how confident you are in \
         this analysis\"\n\
         }}\n\n\
         Focus on:\n\
         - The main joke or humor (keep it short)\n\
         - Why it's funny (be concise)\n\
         - Keep explanations brief and accessible"
    )
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[async_trait]
impl MemeAnalyzer for GeminiAnalyzer {
    async fn analyze(
        &self,
        payload: &ImagePayload,
        language: &str,
        meme_url: Option<&str>,
    ) -> Result<MemeAnalysis, AnalyzeError> {
        info!(
            "analyzing meme with Gemini (model={}, language={})",
            self.model, language
        );
        let response = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(&self.request_body(payload, language, meme_url))
            .send()
            .await
            .map_err(|err| AnalyzeError::Request(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalyzeError::Request(format!(
                "Gemini returned status {status}"
            )));
        }
        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|err| AnalyzeError::InvalidResponse(err.to_string()))?;
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default();
        if text.trim().is_empty() {
            return Err(AnalyzeError::InvalidResponse(
                "empty response from Gemini model".to_string(),
            ));
        }
        debug!("Gemini responded (content_len={})", text.len());
        response::parse_analysis(&text)
    }
}
