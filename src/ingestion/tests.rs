//! Ingestion Module Tests
//!
//! ## Test Scopes
//! - **Record building**: Question completeness check, default filling and `recency` parsing.
//! - **Handler**: Status codes, response bodies and store side effects of `POST /api/interview`.

#[cfg(test)]
mod tests {
    use crate::error::{ApiError, MSG_INCOMPLETE_QUESTIONS, MSG_SAVE_FAILED};
    use crate::ingestion::handlers::{SAVED_MESSAGE, build_record, handle_ingest};
    use crate::ingestion::types::{IngestRequest, RecencyInput};
    use crate::records::{InterviewRecord, StoredRecord};
    use crate::storage::{MemoryStore, RecordFilter, RecordStore, StoreError};
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::{Extension, Json};
    use chrono::{TimeZone, Utc};
    use serde_json::{Value, json};
    use std::sync::Arc;

    /// A store whose backend is unreachable.
    struct UnreachableStore;

    impl RecordStore for UnreachableStore {
        fn name(&self) -> &'static str {
            "unreachable"
        }

        async fn insert(&self, _record: InterviewRecord) -> Result<StoredRecord, StoreError> {
            Err(StoreError::Backend("connection refused".to_string()))
        }

        async fn find(&self, _filter: &RecordFilter) -> Result<Vec<StoredRecord>, StoreError> {
            Err(StoreError::Backend("connection refused".to_string()))
        }
    }

    fn request(body: Value) -> IngestRequest {
        serde_json::from_value(body).expect("Invalid test request")
    }

    fn meta_request() -> Value {
        json!({
            "company": "Meta",
            "role": "Backend",
            "position": "SDE1",
            "experience": "0-2y",
            "year": "2024",
            "questions": [
                {"text": "Reverse a list", "topic": "LinkedList", "roundType": "Technical", "difficulty": "Easy"}
            ]
        })
    }

    async fn ingest<S: RecordStore>(store: &Arc<S>, body: Value) -> Response {
        handle_ingest(Extension(store.clone()), Ok(Json(request(body))))
            .await
            .into_response()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        serde_json::from_slice(&bytes).expect("Body is not JSON")
    }

    // ============================================================
    // RECORD BUILDING TESTS
    // ============================================================

    #[test]
    fn test_build_record_fills_defaults() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        let record = build_record(request(meta_request()), now).unwrap();

        assert_eq!(record.questions.len(), 1);
        assert_eq!(record.questions[0].frequency, 3);
        assert_eq!(record.questions[0].recency, now);
        assert_eq!(record.questions[0].round_type, "Technical");
        assert_eq!(record.experience, "0-2y");
    }

    #[test]
    fn test_build_record_keeps_given_values() {
        let now = Utc::now();
        let seen = Utc.with_ymd_and_hms(2023, 1, 15, 9, 30, 0).unwrap();
        let mut body = meta_request();
        body["questions"][0]["frequency"] = json!(5);
        body["questions"][0]["recency"] = json!("2023-01-15T09:30:00Z");

        let record = build_record(request(body), now).unwrap();

        assert_eq!(record.questions[0].frequency, 5);
        assert_eq!(record.questions[0].recency, seen);
    }

    #[test]
    fn test_build_record_accepts_date_only_recency() {
        let mut body = meta_request();
        body["questions"][0]["recency"] = json!("2024-02-29");

        let record = build_record(request(body), Utc::now()).unwrap();

        assert_eq!(
            record.questions[0].recency,
            Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_build_record_accepts_epoch_millis_recency() {
        let seen = Utc.with_ymd_and_hms(2023, 6, 1, 10, 0, 0).unwrap();
        let mut body = meta_request();
        body["questions"][0]["recency"] = json!(seen.timestamp_millis());

        let record = build_record(request(body), Utc::now()).unwrap();

        assert_eq!(record.questions[0].recency, seen);
    }

    #[test]
    fn test_build_record_unset_recency_gets_now() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        for unset in [json!(0), json!(""), json!(null)] {
            let mut body = meta_request();
            body["questions"][0]["recency"] = unset.clone();

            let record = build_record(request(body), now).unwrap();

            assert_eq!(record.questions[0].recency, now, "{} should default", unset);
        }
    }

    #[test]
    fn test_build_record_rejects_unreadable_recency() {
        let mut body = meta_request();
        body["questions"][0]["recency"] = json!("last spring");

        let result = build_record(request(body), Utc::now());

        match result {
            Err(ApiError::SaveFailed(StoreError::Validation(err))) => {
                assert!(err.has_path("questions.0.recency"));
                assert!(err.to_string().contains("last spring"));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_recency_input_kinds() {
        let parse = |value: Value| serde_json::from_value::<RecencyInput>(value).unwrap();

        assert_eq!(parse(json!(1700000000000_i64)), RecencyInput::Millis(1_700_000_000_000));
        assert_eq!(parse(json!("2024-01-01")), RecencyInput::Text("2024-01-01".to_string()));
        assert!(parse(json!(1.5)).to_datetime().is_none());
        assert!(parse(json!(true)).to_datetime().is_none());
        assert!(parse(json!("2024-13-01")).to_datetime().is_none());
        assert!(parse(json!("2024-01-01T00:00:00+02:00")).to_datetime().is_some());
    }

    #[test]
    fn test_build_record_zero_frequency_gets_default() {
        let mut body = meta_request();
        body["questions"][0]["frequency"] = json!(0);

        let record = build_record(request(body), Utc::now()).unwrap();

        assert_eq!(record.questions[0].frequency, 3);
    }

    #[test]
    fn test_build_record_requires_question_list() {
        let mut body = meta_request();
        body.as_object_mut().unwrap().remove("questions");

        let result = build_record(request(body), Utc::now());

        assert!(matches!(result, Err(ApiError::IncompleteQuestions)));
    }

    #[test]
    fn test_build_record_rejects_empty_text() {
        let mut body = meta_request();
        body["questions"][0]["text"] = json!("");

        let result = build_record(request(body), Utc::now());

        assert!(matches!(result, Err(ApiError::IncompleteQuestions)));
    }

    // ============================================================
    // HANDLER TESTS
    // ============================================================

    #[tokio::test]
    async fn test_ingest_stores_record_with_defaults() {
        let store = Arc::new(MemoryStore::new());

        let response = ingest(&store, meta_request()).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["message"], SAVED_MESSAGE);
        assert_eq!(body["data"]["company"], "Meta");
        assert_eq!(body["data"]["questions"][0]["frequency"], 3);
        assert!(body["data"]["questions"][0]["recency"].is_string());

        let id = body["data"]["_id"].as_str().expect("Missing _id");
        assert_eq!(id.len(), 24);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_ingest_keeps_question_count_and_order() {
        let store = Arc::new(MemoryStore::new());
        let mut body = meta_request();
        body["questions"] = json!([
            {"text": "Two sum", "topic": "Arrays", "roundType": "OA", "difficulty": "Easy", "frequency": 5},
            {"text": "LRU cache", "topic": "Design", "roundType": "Design", "difficulty": "Medium"},
            {"text": "Tell me about a conflict", "topic": "Behavioral", "roundType": "HR", "difficulty": "Easy"}
        ]);

        let response = ingest(&store, body).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        let questions = body["data"]["questions"].as_array().unwrap();
        assert_eq!(questions.len(), 3);
        assert_eq!(questions[0]["text"], "Two sum");
        assert_eq!(questions[0]["frequency"], 5);
        assert_eq!(questions[1]["frequency"], 3);
        assert_eq!(questions[2]["roundType"], "HR");
    }

    #[tokio::test]
    async fn test_ingest_missing_topic_is_client_error() {
        let store = Arc::new(MemoryStore::new());
        let mut body = meta_request();
        body["questions"][0].as_object_mut().unwrap().remove("topic");

        let response = ingest(&store, body).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], MSG_INCOMPLETE_QUESTIONS);
        assert!(body.get("details").is_none());
        assert!(store.is_empty(), "Store must be unchanged");
    }

    #[tokio::test]
    async fn test_ingest_invalid_enum_is_server_error() {
        let store = Arc::new(MemoryStore::new());
        let mut body = meta_request();
        body["questions"][0]["difficulty"] = json!("Extreme");

        let response = ingest(&store, body).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], MSG_SAVE_FAILED);
        let details = body["details"].as_str().unwrap();
        assert!(details.contains("questions.0.difficulty"));
        assert!(details.contains("Extreme"));
        assert!(store.is_empty(), "Store must be unchanged");
    }

    #[tokio::test]
    async fn test_ingest_missing_company_is_server_error() {
        let store = Arc::new(MemoryStore::new());
        let mut body = meta_request();
        body.as_object_mut().unwrap().remove("company");

        let response = ingest(&store, body).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(body["details"].as_str().unwrap().contains("Path `company` is required."));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_ingest_missing_experience_is_server_error() {
        let store = Arc::new(MemoryStore::new());
        let mut body = meta_request();
        body.as_object_mut().unwrap().remove("experience");

        let response = ingest(&store, body).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], MSG_SAVE_FAILED);
        assert!(body["details"].as_str().unwrap().contains("Path `experience` is required."));
        assert!(store.is_empty(), "Store must be unchanged");
    }

    #[tokio::test]
    async fn test_ingest_unreadable_recency_is_server_error() {
        let store = Arc::new(MemoryStore::new());
        let mut body = meta_request();
        body["questions"][0]["recency"] = json!("yesterday");

        let response = ingest(&store, body).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], MSG_SAVE_FAILED);
        assert!(body["details"].as_str().unwrap().contains("questions.0.recency"));
        assert!(store.is_empty(), "Store must be unchanged");
    }

    #[tokio::test]
    async fn test_ingest_duplicates_accumulate() {
        let store = Arc::new(MemoryStore::new());

        for _ in 0..3 {
            let response = ingest(&store, meta_request()).await;
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        assert_eq!(store.len(), 3);
    }

    #[tokio::test]
    async fn test_ingest_store_failure_is_server_error() {
        let store = Arc::new(UnreachableStore);

        let response = ingest(&store, meta_request()).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], MSG_SAVE_FAILED);
        assert_eq!(body["details"], "connection refused");
    }

    #[tokio::test]
    async fn test_invalid_body_is_client_error() {
        let response = ApiError::InvalidBody("expected value at line 1 column 1".to_string())
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Invalid request body");
        assert_eq!(body["details"], "expected value at line 1 column 1");
    }
}
