use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    middleware::request_id::RequestId,
    models::{PipelineState, RecommendationResponse},
    services::EventLog,
};

use super::AppState;

// Request types

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    /// Free-text description of what the user wants to watch
    #[serde(default)]
    pub q: Option<String>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Runs the recommendation pipeline for one query.
///
/// A missing or blank query returns the idle placeholder. A resolve failure is reported
/// with 502 and the same body shape, so the client can always render the status label.
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<RecommendationQuery>,
) -> (StatusCode, Json<RecommendationResponse>) {
    let query = params.q.unwrap_or_default();
    if query.trim().is_empty() {
        return (StatusCode::OK, Json(RecommendationResponse::idle()));
    }

    tracing::info!(request_id = %request_id, query = %query, "Processing recommendation request");

    let log = EventLog::new();
    let outcome = state.pipeline.run(&query, &log).await;
    let response = outcome.into_response(log.into_events());

    tracing::info!(
        request_id = %request_id,
        state = ?response.state,
        movies = response.movies.len(),
        "Recommendation request completed"
    );

    let status = match response.state {
        PipelineState::Error => StatusCode::BAD_GATEWAY,
        PipelineState::Idle | PipelineState::Empty | PipelineState::Complete => StatusCode::OK,
    };

    (status, Json(response))
}
