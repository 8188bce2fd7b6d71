//! OpenAI chat-completions analyzer.

use crate::language;
use crate::prompt;
use crate::response;
use async_trait::async_trait;
use log::{debug, info};
use memelens_core::{AnalyzeError, ImagePayload, MemeAnalysis, MemeAnalyzer};
use serde::Deserialize;
use serde_json::{Value, json};

/// Default API base URL.
const DEFAULT_BASE_URL: &str = "https://api.openai.com";
/// Default vision-capable model.
const DEFAULT_MODEL: &str = "gpt-4o";
/// Maximum response tokens for one explanation.
const MAX_TOKENS: u32 = 1000;

/// Analyzer backed by the OpenAI chat-completions API.
pub struct OpenAiAnalyzer {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiAnalyzer {
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
        json!({
            "model": self.model,
            "messages": [
                {
                    "role": "system",
                    "content": system_prompt(language),
                },
                {
                    "role": "user",
                    "content": [
                        {
                            "type": "text",
                            "text": prompt::user_text(target, meme_url),
                        },
                        {
                            "type": "image_url",
                            "image_url": {
                                "url": format!("data:image/jpeg;base64,{}", payload.base64_data),
                            },
                        },
                    ],
                },
            ],
            "response_format": { "type": "json_object" },
            "max_tokens": MAX_TOKENS,
        })
    }
}

/// System prompt asking for a detailed JSON-shaped explanation.
fn system_prompt(language: &str) -> String {
    let target = language::language_name(language);
    let mut text = format!(
        "You are an expert meme analyst who understands internet culture, humor, and memes \
         across different platforms and cultures. Analyze the provided meme image and explain \
         it in {target}.\n\n\
         Your response must be in JSON format with the following structure:\n\
         {{\n\
         \x20 \"explanation\": \"A clear, detailed explanation of the meme in {target}. Explain \
         the visual elements, the joke, and why it's funny. Keep it conversational and easy to \
         understand.\",\n\
         \x20 \"culturalContext\": \"Optional additional context about cultural references, \
         origins, or background that would help someone understand the meme better. Only \
         include if relevant.\",\n\
         \x20 \"confidence\": \"A number between 0 and 1 indicating how confident you are in \
         this analysis\"\n\
         }}\n\n\
         Focus on:\n\
         - What the image shows\n\
         - The joke or humor being conveyed\n\
         - Any cultural or internet references\n\
         - Why this format/template is popular\n\
         - Make it accessible to someone who might not be familiar with internet culture"
    );
    if language == language::HINGLISH {
        text.push_str("\n\n");
        text.push_str(prompt::HINGLISH_INSTRUCTION);
    }
    text
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[async_trait]
impl MemeAnalyzer for OpenAiAnalyzer {
    async fn analyze(
        &self,
        payload: &ImagePayload,
        language: &str,
        meme_url: Option<&str>,
    ) -> Result<MemeAnalysis, AnalyzeError> {
        info!(
            "analyzing meme with OpenAI (model={}, language={})",
            self.model, language
        );
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&self.request_body(payload, language, meme_url))
            .send()
            .await
            .map_err(|err| AnalyzeError::Request(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalyzeError::Request(format!(
                "OpenAI returned status {status}"
            )));
        }
        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|err| AnalyzeError::InvalidResponse(err.to_string()))?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AnalyzeError::InvalidResponse("empty completion".to_string()))?;
        debug!("OpenAI responded (content_len={})", content.len());
        response::parse_analysis(&content)
    }
}
