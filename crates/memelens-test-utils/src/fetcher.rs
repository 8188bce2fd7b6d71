use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use memelens_core::{FetchError, ImagePayload, MemeFetcher};
use parking_lot::Mutex;
use std::sync::Arc;

/// Leading bytes of a minimal JPEG, enough to pass the signature check.
const JPEG_PREFIX: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46];

#[derive(Debug, Clone)]
pub struct FixedFetcher {
    payload: ImagePayload,
}

impl FixedFetcher {
    pub fn new(payload: ImagePayload) -> Self {
        Self { payload }
    }

    pub fn jpeg(file_name: impl Into<String>) -> Self {
        Self {
            payload: ImagePayload {
                base64_data: general_purpose::STANDARD.encode(JPEG_PREFIX),
                content_type: Some("image/jpeg".to_string()),
                file_name: file_name.into(),
            },
        }
    }
}

#[async_trait]
impl MemeFetcher for FixedFetcher {
    async fn fetch(&self, _url: &str) -> Result<ImagePayload, FetchError> {
        Ok(self.payload.clone())
    }
}

enum FailureKind {
    InvalidUrl,
    Status(u16),
    NotAnImage,
}

pub struct FailingFetcher {
    kind: FailureKind,
}

impl FailingFetcher {
    pub fn invalid_url() -> Self {
        Self {
            kind: FailureKind::InvalidUrl,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            kind: FailureKind::Status(status),
        }
    }

    pub fn not_an_image() -> Self {
        Self {
            kind: FailureKind::NotAnImage,
        }
    }
}

#[async_trait]
impl MemeFetcher for FailingFetcher {
    async fn fetch(&self, url: &str) -> Result<ImagePayload, FetchError> {
        Err(match self.kind {
            FailureKind::InvalidUrl => FetchError::InvalidUrl(format!("cannot parse: {url}")),
            FailureKind::Status(status) => FetchError::Status {
                status,
                reason: "error".to_string(),
            },
            FailureKind::NotAnImage => FetchError::NotAnImage,
        })
    }
}

#[derive(Clone)]
pub struct RecordingFetcher {
    payload: ImagePayload,
    urls: Arc<Mutex<Vec<String>>>,
}

impl RecordingFetcher {
    pub fn jpeg(file_name: impl Into<String>) -> (Self, Arc<Mutex<Vec<String>>>) {
        let urls = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                payload: FixedFetcher::jpeg(file_name).payload,
                urls: urls.clone(),
            },
            urls,
        )
    }
}

#[async_trait]
impl MemeFetcher for RecordingFetcher {
    async fn fetch(&self, url: &str) -> Result<ImagePayload, FetchError> {
        self.urls.lock().push(url.to_string());
        Ok(self.payload.clone())
    }
}
