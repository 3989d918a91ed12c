//! HTTP surface of the service.
//!
//! Wires the handlers to their routes for a concrete `RecordStore`. The store handle is
//! shared with every handler through an `Extension` layer.

use crate::ingestion::handlers::handle_ingest;
use crate::search::handlers::handle_search;
use crate::storage::RecordStore;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Stores one interview submission.
pub const ENDPOINT_INTERVIEW: &str = "/api/interview";
/// Looks up questions by company/role/position/year.
pub const ENDPOINT_SEARCH: &str = "/api/interview/search";
pub const ENDPOINT_HEALTH: &str = "/health";

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub store: String,
}

pub fn router<S: RecordStore>(store: Arc<S>, cors_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route(ENDPOINT_INTERVIEW, post(handle_ingest::<S>))
        .route(ENDPOINT_SEARCH, get(handle_search::<S>))
        .route(ENDPOINT_HEALTH, get(handle_health::<S>))
        .layer(Extension(store))
        .layer(cors)
}

pub async fn handle_health<S: RecordStore>(
    Extension(store): Extension<Arc<S>>,
) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        store: store.name().to_string(),
    })
}
