//! Interview Record Module
//!
//! Defines the document persisted for every submission and the constraints it must
//! satisfy before any store accepts it.
//!
//! ## Submodules
//! - **`types`**: `InterviewRecord`, its embedded `Question`s and the stored form with `_id`.
//! - **`schema`**: The fixed enumerations (topics, round types, difficulties, positions)
//!   and the validation that enforces them.

pub mod schema;
pub mod types;

pub use schema::SchemaError;
pub use types::{DEFAULT_FREQUENCY, InterviewRecord, Question, RecordId, StoredRecord};
