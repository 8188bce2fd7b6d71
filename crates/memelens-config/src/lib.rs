//! Configuration schema and loading for MemeLens.
//!
//! This crate owns the config schema, JSON5 loading, and validation used by
//! the server binary.

mod error;
mod model;

/// Public error type returned by config loading and validation APIs.
pub use error::ConfigError;
/// Configuration schema models.
pub use model::*;
