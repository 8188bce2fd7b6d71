//! Test helpers shared across MemeLens crates.

pub mod analyzer;
pub mod fetcher;

pub use analyzer::{FailingAnalyzer, FixedAnalyzer, RecordingAnalyzer};
pub use fetcher::{FailingFetcher, FixedFetcher, RecordingFetcher};
