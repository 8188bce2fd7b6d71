//! In-memory explanation store.

use crate::types::{MemeRecord, NewMemeRecord, RecordId};
use chrono::Utc;
use log::{debug, info};
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

/// Store for completed explanations.
///
/// Constructed once and injected into the request path; records survive only
/// for the process lifetime.
pub trait ExplanationStore: Send + Sync {
    /// Assign identity and timestamp to a new record and store it.
    fn insert(&self, record: NewMemeRecord) -> MemeRecord;
    /// Fetch a record by id.
    fn get(&self, id: RecordId) -> Option<MemeRecord>;
    /// Return the most recent records, newest first.
    fn recent(&self, limit: usize) -> Vec<MemeRecord>;
}

/// HashMap-backed store guarded by a read-write lock.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<RecordId, MemeRecord>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ExplanationStore for MemoryStore {
    fn insert(&self, record: NewMemeRecord) -> MemeRecord {
        let record = MemeRecord {
            id: Uuid::new_v4(),
            meme_url: record.meme_url,
            source: record.source,
            file_name: record.file_name,
            language: record.language,
            explanation: record.explanation,
            cultural_context: record.cultural_context,
            confidence: record.confidence.clamp(0.0, 1.0),
            created_at: Utc::now(),
        };
        info!(
            "stored explanation (id={}, source={}, language={})",
            record.id,
            record.source.as_str(),
            record.language
        );
        self.records.write().insert(record.id, record.clone());
        record
    }

    fn get(&self, id: RecordId) -> Option<MemeRecord> {
        self.records.read().get(&id).cloned()
    }

    fn recent(&self, limit: usize) -> Vec<MemeRecord> {
        let mut records: Vec<MemeRecord> = self.records.read().values().cloned().collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records.truncate(limit);
        debug!("listed recent explanations (returned={})", records.len());
        records
    }
}
