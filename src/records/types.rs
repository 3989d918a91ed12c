//! Record Data Types
//!
//! The persisted shape of an interview submission. A `Question` has no identity of its
//! own: it is created, stored and returned only as part of its parent `InterviewRecord`.

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Frequency assigned to a question submitted without one.
pub const DEFAULT_FREQUENCY: i64 = 3;

/// Store-assigned identifier of a persisted record.
///
/// Rendered as a 24 hex digit object id, both in the HTTP responses and in the
/// `_id` field of the document store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn new() -> Self {
        Self(ObjectId::new().to_hex())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single interview question as it is stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Question {
    pub text: String,
    /// One of [`crate::records::schema::TOPICS`].
    pub topic: String,
    /// One of [`crate::records::schema::ROUND_TYPES`].
    #[serde(rename = "roundType")]
    pub round_type: String,
    /// One of [`crate::records::schema::DIFFICULTIES`].
    pub difficulty: String,
    /// How often the question shows up, 1 (rarely) to 5 (almost always).
    pub frequency: i64,
    /// When the question was last seen.
    pub recency: DateTime<Utc>,
}

/// One submission describing a company/role/position/year interview and its questions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InterviewRecord {
    pub company: String,
    pub role: String,
    /// One of [`crate::records::schema::POSITIONS`].
    pub position: String,
    pub experience: String,
    pub year: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// An `InterviewRecord` together with the identifier the store gave it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredRecord {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(flatten)]
    pub record: InterviewRecord,
}
