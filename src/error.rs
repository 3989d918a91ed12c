//! HTTP error taxonomy.
//!
//! Every failure a handler can report, with the status code and JSON body the API
//! promises for it. Handlers return `Result<_, ApiError>` and axum renders the error
//! through `IntoResponse`.

use crate::storage::StoreError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MSG_INVALID_BODY: &str = "Invalid request body";
pub const MSG_INCOMPLETE_QUESTIONS: &str =
    "Each question must have text, topic, roundType, and difficulty";
pub const MSG_SAVE_FAILED: &str = "Failed to save data";
pub const MSG_MISSING_PARAMETERS: &str =
    "All parameters (company, role, position, year) are required.";
pub const MSG_NO_MATCHING_DATA: &str = "No matching data found.";
pub const MSG_NO_MATCHING_QUESTIONS: &str = "No questions found for the given filters.";
pub const MSG_INTERNAL: &str = "Internal Server Error";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Each question must have text, topic, roundType, and difficulty")]
    IncompleteQuestions,

    #[error("Failed to save data: {0}")]
    SaveFailed(#[source] StoreError),

    #[error("All parameters (company, role, position, year) are required.")]
    MissingSearchParameters,

    #[error("No matching data found.")]
    NoMatchingData,

    #[error("No questions found for the given filters.")]
    NoMatchingQuestions,

    #[error("Internal Server Error: {0}")]
    SearchFailed(#[source] StoreError),
}

/// Body of 400 and 500 responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Body of 404 responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(_)
            | ApiError::IncompleteQuestions
            | ApiError::MissingSearchParameters => StatusCode::BAD_REQUEST,
            ApiError::NoMatchingData | ApiError::NoMatchingQuestions => StatusCode::NOT_FOUND,
            ApiError::SaveFailed(_) | ApiError::SearchFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

fn error_body(error: &str, details: Option<String>) -> Response {
    Json(ErrorBody {
        error: error.to_string(),
        details,
    })
    .into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!("{}", self);
        }

        let body = match self {
            ApiError::InvalidBody(details) => error_body(MSG_INVALID_BODY, Some(details)),
            ApiError::IncompleteQuestions => error_body(MSG_INCOMPLETE_QUESTIONS, None),
            ApiError::SaveFailed(err) => error_body(MSG_SAVE_FAILED, Some(err.to_string())),
            ApiError::MissingSearchParameters => error_body(MSG_MISSING_PARAMETERS, None),
            ApiError::NoMatchingData => Json(MessageBody {
                message: MSG_NO_MATCHING_DATA.to_string(),
            })
            .into_response(),
            ApiError::NoMatchingQuestions => Json(MessageBody {
                message: MSG_NO_MATCHING_QUESTIONS.to_string(),
            })
            .into_response(),
            ApiError::SearchFailed(err) => error_body(MSG_INTERNAL, Some(err.to_string())),
        };

        (status, body).into_response()
    }
}
