//! Meme acquisition and validation pipeline.
//!
//! This crate owns the scoped core of MemeLens: image signature validation,
//! the URL fetcher, the analyzer and store capability traits, and the explain
//! service that drives a request from raw input to a stored explanation.

mod analyze;
mod error;
mod fetch;
pub mod image;
mod service;
mod store;
mod types;

pub use analyze::{AnalyzeError, MemeAnalysis, MemeAnalyzer};
pub use error::ExplainError;
pub use fetch::{DEFAULT_USER_AGENT, FetchError, HttpMemeFetcher, MemeFetcher};
pub use service::ExplainService;
pub use store::{ExplanationStore, MemoryStore};
pub use types::{ImagePayload, MemeInput, MemeRecord, MemeSource, NewMemeRecord, RecordId};
