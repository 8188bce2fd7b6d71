//! URL-based meme acquisition.

use crate::image;
use crate::types::ImagePayload;
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use log::{debug, info};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Browser-like User-Agent sent with fetches; some origins reject
/// non-browser clients outright.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Fallback display name when the URL path has no usable segment.
const DEFAULT_FETCH_NAME: &str = "meme.jpg";

/// Errors returned while fetching a meme from a URL.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The input was not a valid absolute http(s) URL.
    #[error("invalid meme URL: {0}")]
    InvalidUrl(String),
    /// The origin answered with a non-success status.
    #[error("failed to fetch meme: {status} {reason}")]
    Status { status: u16, reason: String },
    /// The request failed at the transport level.
    #[error("failed to fetch meme: {0}")]
    Request(#[from] reqwest::Error),
    /// The response did not carry image bytes.
    #[error("URL does not point to an image. Please provide a direct image URL.")]
    NotAnImage,
    /// The response body exceeded the configured cap.
    #[error("image is larger than the {max_bytes} byte limit")]
    TooLarge { max_bytes: usize },
}

/// Acquisition capability turning a URL into a validated image payload.
#[async_trait]
pub trait MemeFetcher: Send + Sync {
    /// Fetch a meme image from an absolute URL.
    async fn fetch(&self, url: &str) -> Result<ImagePayload, FetchError>;
}

/// reqwest-backed fetcher with a request timeout and a body-size cap.
pub struct HttpMemeFetcher {
    client: reqwest::Client,
    max_bytes: usize,
}

impl HttpMemeFetcher {
    /// Create a fetcher with the given timeout, body cap, and User-Agent.
    pub fn new(timeout: Duration, max_bytes: usize, user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client, max_bytes })
    }
}

#[async_trait]
impl MemeFetcher for HttpMemeFetcher {
    async fn fetch(&self, url: &str) -> Result<ImagePayload, FetchError> {
        let parsed = Url::parse(url).map_err(|err| FetchError::InvalidUrl(err.to_string()))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(FetchError::InvalidUrl(format!(
                "unsupported scheme: {}",
                parsed.scheme()
            )));
        }
        debug!(
            "fetching meme (host={}, max_bytes={})",
            parsed.host_str().unwrap_or(""),
            self.max_bytes
        );

        let response = self.client.get(parsed.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let is_image = content_type
            .as_deref()
            .is_some_and(|value| value.starts_with("image/"));
        if !is_image {
            return Err(FetchError::NotAnImage);
        }

        if let Some(length) = response.content_length() {
            if length as usize > self.max_bytes {
                return Err(FetchError::TooLarge {
                    max_bytes: self.max_bytes,
                });
            }
        }
        let body = response.bytes().await?;
        if body.len() > self.max_bytes {
            return Err(FetchError::TooLarge {
                max_bytes: self.max_bytes,
            });
        }
        // Content-type headers can be spoofed; the bytes decide.
        if !image::is_valid_image(&body) {
            return Err(FetchError::NotAnImage);
        }

        let file_name = file_name_from_url(&parsed);
        info!(
            "fetched meme (bytes={}, content_type={}, file_name={})",
            body.len(),
            content_type.as_deref().unwrap_or(""),
            file_name
        );
        Ok(ImagePayload {
            base64_data: general_purpose::STANDARD.encode(&body),
            content_type,
            file_name,
        })
    }
}

/// Derive a display name from the final URL path segment.
fn file_name_from_url(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| DEFAULT_FETCH_NAME.to_string())
}
