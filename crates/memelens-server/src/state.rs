//! Shared request-handling state.

use memelens_core::{ExplainService, ExplanationStore};
use std::sync::Arc;

/// State injected into every handler.
#[derive(Clone)]
pub struct AppState {
    /// The explain pipeline.
    pub service: Arc<ExplainService>,
    /// Store handle for the read endpoints.
    pub store: Arc<dyn ExplanationStore>,
    /// How many records the recent-list endpoint returns.
    pub recent_limit: usize,
}

impl AppState {
    /// Build state around a service; the store handle is shared with it.
    pub fn new(service: ExplainService, recent_limit: usize) -> Self {
        let store = service.store();
        Self {
            service: Arc::new(service),
            store,
            recent_limit,
        }
    }
}
