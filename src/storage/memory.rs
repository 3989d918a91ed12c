use super::store::{RecordFilter, RecordStore, StoreError};
use crate::records::{InterviewRecord, RecordId, StoredRecord};

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// In-process record store.
///
/// Records live in a `DashMap` keyed by id. Every insert takes the next value of a
/// sequence counter so `find` can hand records back in insertion order.
pub struct MemoryStore {
    records: DashMap<RecordId, Entry>,
    sequence: AtomicU64,
}

struct Entry {
    seq: u64,
    stored: StoredRecord,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            sequence: AtomicU64::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &RecordId) -> Option<StoredRecord> {
        self.records.get(id).map(|entry| entry.stored.clone())
    }

    fn store_local(&self, record: InterviewRecord) -> StoredRecord {
        let stored = StoredRecord {
            id: RecordId::new(),
            record,
        };
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        self.records.insert(
            stored.id.clone(),
            Entry {
                seq,
                stored: stored.clone(),
            },
        );
        stored
    }

    fn matching(&self, filter: &RecordFilter) -> Vec<StoredRecord> {
        let mut entries: Vec<(u64, StoredRecord)> = self
            .records
            .iter()
            .filter(|entry| filter.matches(&entry.value().stored.record))
            .map(|entry| (entry.value().seq, entry.value().stored.clone()))
            .collect();

        entries.sort_by_key(|(seq, _)| *seq);
        entries.into_iter().map(|(_, stored)| stored).collect()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, record: InterviewRecord) -> Result<StoredRecord, StoreError> {
        record.validate()?;
        let stored = self.store_local(record);
        tracing::debug!("Stored record {} in memory", stored.id);
        Ok(stored)
    }

    async fn find(&self, filter: &RecordFilter) -> Result<Vec<StoredRecord>, StoreError> {
        Ok(self.matching(filter))
    }
}
