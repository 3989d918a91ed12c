use super::engine::search;
use super::types::{QuestionFilter, SearchParams, SearchResponse};
use crate::error::ApiError;
use crate::storage::{RecordFilter, RecordStore};
use axum::extract::Query;
use axum::{Extension, Json};
use std::sync::Arc;

pub async fn handle_search<S: RecordStore>(
    Extension(store): Extension<Arc<S>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let (records, questions) = parse_params(&params)?;

    let response = search(store.as_ref(), &records, &questions).await?;

    tracing::info!(
        "Search {}/{}/{}/{} matched {} records, {} questions",
        records.company,
        records.role,
        records.position,
        records.year,
        response.total_results,
        response.total_questions
    );

    Ok(Json(response))
}

/// Splits the query string into record-level and question-level criteria.
///
/// The four record parameters are mandatory; empty values count as missing.
/// Empty `topic`/`difficulty` values count as not given.
pub fn parse_params(params: &SearchParams) -> Result<(RecordFilter, QuestionFilter), ApiError> {
    let (Some(company), Some(role), Some(position), Some(year)) = (
        non_empty(&params.company),
        non_empty(&params.role),
        non_empty(&params.position),
        non_empty(&params.year),
    ) else {
        return Err(ApiError::MissingSearchParameters);
    };

    let questions = QuestionFilter {
        topic: params.topic.clone().filter(|t| !t.is_empty()),
        difficulty: params.difficulty.clone().filter(|d| !d.is_empty()),
    };

    Ok((RecordFilter::new(company, role, position, year), questions))
}

/// Whitespace-only values count as given; they trim to an empty criterion that matches nothing.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
