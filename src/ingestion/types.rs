//! Ingestion Data Types
//!
//! Request and response bodies of `POST /api/interview`.

use crate::records::StoredRecord;
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

/// A submission as the client sends it.
///
/// Every field is optional at this layer. Presence of the question fields is checked by
/// the handler; everything else is left to schema validation in the store, so a missing
/// `company` is reported as a failed save rather than a malformed request.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct IngestRequest {
    pub company: Option<String>,
    pub role: Option<String>,
    pub position: Option<String>,
    pub experience: Option<String>,
    pub year: Option<String>,
    pub questions: Option<Vec<QuestionInput>>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct QuestionInput {
    pub text: Option<String>,
    pub topic: Option<String>,
    #[serde(rename = "roundType")]
    pub round_type: Option<String>,
    pub difficulty: Option<String>,
    pub frequency: Option<i64>,
    pub recency: Option<RecencyInput>,
}

impl QuestionInput {
    /// True if text, topic, roundType and difficulty are all present and non-empty.
    pub fn is_complete(&self) -> bool {
        [&self.text, &self.topic, &self.round_type, &self.difficulty]
            .iter()
            .all(|field| field.as_deref().is_some_and(|value| !value.is_empty()))
    }
}

/// A `recency` value as clients send it: epoch milliseconds, an RFC 3339 timestamp or a
/// plain `YYYY-MM-DD` date.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RecencyInput {
    Millis(i64),
    Text(String),
    #[serde(skip_serializing)]
    Unsupported(IgnoredAny),
}

impl RecencyInput {
    /// True for the values a submission uses to mean "not given": `0` and `""`.
    pub fn is_unset(&self) -> bool {
        match self {
            RecencyInput::Millis(millis) => *millis == 0,
            RecencyInput::Text(text) => text.is_empty(),
            RecencyInput::Unsupported(_) => false,
        }
    }

    /// Converts to a UTC timestamp, or `None` if the value is not a date.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            RecencyInput::Millis(millis) => DateTime::from_timestamp_millis(*millis),
            RecencyInput::Text(text) => {
                let text = text.trim();
                if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
                    return Some(dt.with_timezone(&Utc));
                }
                NaiveDate::parse_from_str(text, "%Y-%m-%d")
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
                    .map(|midnight| midnight.and_utc())
            }
            RecencyInput::Unsupported(_) => None,
        }
    }

    /// Reason reported when the value cannot be read as a date.
    pub fn cast_failure(&self) -> String {
        match self {
            RecencyInput::Millis(millis) => format!(
                "Cast to date failed for value \"{}\" (type number) at path \"recency\"",
                millis
            ),
            RecencyInput::Text(text) => format!(
                "Cast to date failed for value \"{}\" (type string) at path \"recency\"",
                text
            ),
            RecencyInput::Unsupported(_) => "Cast to date failed at path \"recency\"".to_string(),
        }
    }
}

/// Returned with `201 Created` once the record is stored.
#[derive(Debug, Serialize, Deserialize)]
pub struct IngestResponse {
    pub message: String,
    pub data: StoredRecord,
}
