//! Store Contract
//!
//! The seam between the HTTP handlers and the document store. Handlers hold an
//! `Arc<S>` where `S: RecordStore`, so the process picks a backend once at startup and
//! tests can swap in the in-memory one.

use crate::records::{InterviewRecord, SchemaError, StoredRecord};
use std::future::Future;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The record broke a schema constraint; nothing was written.
    #[error(transparent)]
    Validation(#[from] SchemaError),

    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),

    #[error("{0}")]
    Backend(String),
}

/// The four record-level criteria of a search, already trimmed.
///
/// A record matches when each of its fields equals the criterion ignoring case.
/// This is a full-string comparison: `goog` does not match `Google`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFilter {
    pub company: String,
    pub role: String,
    pub position: String,
    pub year: String,
}

impl RecordFilter {
    pub fn new(company: &str, role: &str, position: &str, year: &str) -> Self {
        Self {
            company: company.trim().to_string(),
            role: role.trim().to_string(),
            position: position.trim().to_string(),
            year: year.trim().to_string(),
        }
    }

    pub fn matches(&self, record: &InterviewRecord) -> bool {
        eq_ignore_case(&record.company, &self.company)
            && eq_ignore_case(&record.role, &self.role)
            && eq_ignore_case(&record.position, &self.position)
            && eq_ignore_case(&record.year, &self.year)
    }
}

fn eq_ignore_case(stored: &str, wanted: &str) -> bool {
    stored == wanted || stored.to_lowercase() == wanted.to_lowercase()
}

/// A persistent collection of interview records.
///
/// Implementations validate every record before writing it and either store the whole
/// record or nothing. `find` returns records in the store's natural order.
pub trait RecordStore: Send + Sync + 'static {
    /// Short backend name, reported by the health endpoint.
    fn name(&self) -> &'static str;

    fn insert(
        &self,
        record: InterviewRecord,
    ) -> impl Future<Output = Result<StoredRecord, StoreError>> + Send;

    fn find(
        &self,
        filter: &RecordFilter,
    ) -> impl Future<Output = Result<Vec<StoredRecord>, StoreError>> + Send;
}
