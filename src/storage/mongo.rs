use super::store::{RecordFilter, RecordStore, StoreError};
use crate::records::{DEFAULT_FREQUENCY, InterviewRecord, Question, RecordId, StoredRecord};

use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use mongodb::bson::{Bson, Document, Regex as BsonRegex, doc};
use mongodb::{Client, Collection, IndexModel};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

pub const COLLECTION: &str = "interviews";
/// Used when the connection string names no database.
pub const DEFAULT_DATABASE: &str = "interview_bank";

/// Shape of a record inside the collection.
///
/// Mirrors the layout existing documents already have: a native `_id`, the
/// `__v` version key and questions carrying their own `_id` with `recency` stored as
/// a BSON date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct InterviewDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub company: String,
    pub role: String,
    pub position: String,
    pub experience: String,
    pub year: String,
    #[serde(default)]
    pub questions: Vec<QuestionDocument>,
    #[serde(rename = "__v", default)]
    pub version: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct QuestionDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub text: String,
    pub topic: String,
    #[serde(rename = "roundType")]
    pub round_type: String,
    pub difficulty: String,
    #[serde(default = "default_frequency", deserialize_with = "frequency_from_bson")]
    pub frequency: i64,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub recency: DateTime<Utc>,
}

fn default_frequency() -> i64 {
    DEFAULT_FREQUENCY
}

/// Numbers written by other clients may arrive as int32, int64 or an integral double.
fn frequency_from_bson<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Bson::deserialize(deserializer)? {
        Bson::Int32(value) => Ok(value.into()),
        Bson::Int64(value) => Ok(value),
        Bson::Double(value) if value.fract() == 0.0 => Ok(value as i64),
        other => Err(D::Error::custom(format!("invalid frequency: {}", other))),
    }
}

impl InterviewDocument {
    pub(crate) fn from_record(record: InterviewRecord) -> Self {
        Self {
            id: ObjectId::new(),
            company: record.company,
            role: record.role,
            position: record.position,
            experience: record.experience,
            year: record.year,
            questions: record
                .questions
                .into_iter()
                .map(|q| QuestionDocument {
                    id: Some(ObjectId::new()),
                    text: q.text,
                    topic: q.topic,
                    round_type: q.round_type,
                    difficulty: q.difficulty,
                    frequency: q.frequency,
                    recency: q.recency,
                })
                .collect(),
            version: 0,
        }
    }
}

impl From<QuestionDocument> for Question {
    fn from(doc: QuestionDocument) -> Self {
        Question {
            text: doc.text,
            topic: doc.topic,
            round_type: doc.round_type,
            difficulty: doc.difficulty,
            frequency: doc.frequency,
            recency: doc.recency,
        }
    }
}

impl From<InterviewDocument> for StoredRecord {
    fn from(doc: InterviewDocument) -> Self {
        StoredRecord {
            id: RecordId(doc.id.to_hex()),
            record: InterviewRecord {
                company: doc.company,
                role: doc.role,
                position: doc.position,
                experience: doc.experience,
                year: doc.year,
                questions: doc.questions.into_iter().map(Question::from).collect(),
            },
        }
    }
}

/// Record store backed by a MongoDB collection.
///
/// The client is created once at startup and shared by every request; the driver
/// pools connections internally.
pub struct MongoStore {
    collection: Collection<InterviewDocument>,
}

impl MongoStore {
    pub async fn connect(uri: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await?;
        let database = client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE));
        let collection = database.collection::<InterviewDocument>(COLLECTION);

        // Reaches the server, so a bad connection string fails startup here.
        collection
            .create_index(
                IndexModel::builder().keys(doc! { "company": 1 }).build(),
                None,
            )
            .await?;

        tracing::info!(
            "MongoDB is connected (database={}, collection={})",
            database.name(),
            COLLECTION
        );

        Ok(Self { collection })
    }
}

impl RecordStore for MongoStore {
    fn name(&self) -> &'static str {
        "mongodb"
    }

    async fn insert(&self, record: InterviewRecord) -> Result<StoredRecord, StoreError> {
        record.validate()?;

        let document = InterviewDocument::from_record(record);
        self.collection.insert_one(&document, None).await?;

        Ok(document.into())
    }

    async fn find(&self, filter: &RecordFilter) -> Result<Vec<StoredRecord>, StoreError> {
        let cursor = self.collection.find(query_document(filter), None).await?;
        let documents: Vec<InterviewDocument> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(StoredRecord::from).collect())
    }
}

/// Builds the server-side query for `filter`.
///
/// Each criterion becomes an anchored, case-insensitive regex over the escaped input,
/// which gives the same full-string match as `RecordFilter::matches`.
pub(crate) fn query_document(filter: &RecordFilter) -> Document {
    doc! {
        "company": exact_ignore_case(&filter.company),
        "role": exact_ignore_case(&filter.role),
        "position": exact_ignore_case(&filter.position),
        "year": exact_ignore_case(&filter.year),
    }
}

fn exact_ignore_case(value: &str) -> Bson {
    Bson::RegularExpression(BsonRegex {
        pattern: format!("^{}$", regex::escape(value)),
        options: "i".to_string(),
    })
}
