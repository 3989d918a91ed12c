use super::types::{QuestionFilter, SearchResponse};
use crate::error::ApiError;
use crate::records::{Question, StoredRecord};
use crate::storage::{RecordFilter, RecordStore};

/// Runs one search: a single store query, then question filtering in memory.
///
/// Distinguishes "no record matched" from "records matched but every question was
/// filtered out"; both are reported as errors.
pub async fn search<S: RecordStore>(
    store: &S,
    records: &RecordFilter,
    questions: &QuestionFilter,
) -> Result<SearchResponse, ApiError> {
    let matched = store.find(records).await.map_err(ApiError::SearchFailed)?;

    if matched.is_empty() {
        return Err(ApiError::NoMatchingData);
    }

    let flattened = flatten_questions(&matched, questions);

    tracing::debug!(
        "Search {:?}: {} records, {} questions",
        records,
        matched.len(),
        flattened.len()
    );

    if flattened.is_empty() {
        return Err(ApiError::NoMatchingQuestions);
    }

    Ok(SearchResponse {
        total_results: matched.len(),
        total_questions: flattened.len(),
        questions: flattened,
    })
}

/// Concatenates the surviving questions of every record, keeping record order and the
/// order of questions inside each record.
pub fn flatten_questions(records: &[StoredRecord], filter: &QuestionFilter) -> Vec<Question> {
    records
        .iter()
        .flat_map(|stored| stored.record.questions.iter())
        .filter(|question| filter.matches(question))
        .cloned()
        .collect()
}
