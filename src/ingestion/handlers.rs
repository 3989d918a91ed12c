use super::types::{IngestRequest, IngestResponse, QuestionInput};
use crate::error::ApiError;
use crate::records::schema::Violation;
use crate::records::{DEFAULT_FREQUENCY, InterviewRecord, Question, SchemaError};
use crate::storage::{RecordStore, StoreError};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub const SAVED_MESSAGE: &str = "Interview data saved successfully";

pub async fn handle_ingest<S: RecordStore>(
    Extension(store): Extension<Arc<S>>,
    payload: Result<Json<IngestRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<IngestResponse>), ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::InvalidBody(e.body_text()))?;

    let record = build_record(req, Utc::now())?;
    let question_count = record.questions.len();

    let stored = store.insert(record).await.map_err(ApiError::SaveFailed)?;

    tracing::info!(
        "Stored interview {} ({} / {} / {}) with {} questions",
        stored.id,
        stored.record.company,
        stored.record.role,
        stored.record.year,
        question_count
    );

    Ok((
        StatusCode::CREATED,
        Json(IngestResponse {
            message: SAVED_MESSAGE.to_string(),
            data: stored,
        }),
    ))
}

/// Turns a submission into a record, filling question defaults.
///
/// Fails with `IncompleteQuestions` when the question list is missing or a question lacks
/// one of its four descriptive fields, and with a failed save when a `recency` is not a
/// date. Everything else is checked by the store.
pub fn build_record(req: IngestRequest, now: DateTime<Utc>) -> Result<InterviewRecord, ApiError> {
    let inputs = match req.questions {
        Some(questions) if questions.iter().all(QuestionInput::is_complete) => questions,
        _ => return Err(ApiError::IncompleteQuestions),
    };

    let mut questions = Vec::with_capacity(inputs.len());
    let mut violations = Vec::new();
    for (idx, input) in inputs.into_iter().enumerate() {
        match build_question(input, now) {
            Ok(question) => questions.push(question),
            Err(reason) => violations.push(Violation {
                path: format!("questions.{}.recency", idx),
                reason,
            }),
        }
    }
    if !violations.is_empty() {
        return Err(ApiError::SaveFailed(StoreError::Validation(SchemaError {
            violations,
        })));
    }

    Ok(InterviewRecord {
        company: req.company.unwrap_or_default(),
        role: req.role.unwrap_or_default(),
        position: req.position.unwrap_or_default(),
        experience: req.experience.unwrap_or_default(),
        year: req.year.unwrap_or_default(),
        questions,
    })
}

fn build_question(input: QuestionInput, now: DateTime<Utc>) -> Result<Question, String> {
    let recency = match input.recency.filter(|r| !r.is_unset()) {
        Some(given) => given.to_datetime().ok_or_else(|| given.cast_failure())?,
        None => now,
    };

    Ok(Question {
        text: input.text.unwrap_or_default(),
        topic: input.topic.unwrap_or_default(),
        round_type: input.round_type.unwrap_or_default(),
        difficulty: input.difficulty.unwrap_or_default(),
        // Zero counts as unset.
        frequency: input
            .frequency
            .filter(|f| *f != 0)
            .unwrap_or(DEFAULT_FREQUENCY),
        recency,
    })
}
