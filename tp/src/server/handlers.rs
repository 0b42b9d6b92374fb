//! HTTP handlers for REST API endpoints

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing};
use tracing::{info, warn};

use super::error::{ApiError, ApiResult};
use crate::pipeline::{TravelPlanner, TravelRequest, TravelResponse};

/// State shared across all handlers
///
/// The planner holds no per-request state, so requests share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<TravelPlanner>,
}

impl AppState {
    pub fn new(planner: Arc<TravelPlanner>) -> Self {
        Self { planner }
    }
}

/// POST /api/plan - Run the planning pipeline for one trip
pub async fn plan_trip(
    State(state): State<AppState>,
    Json(request): Json<TravelRequest>,
) -> ApiResult<Json<TravelResponse>> {
    info!(destination = %request.destination, dates = %request.dates, "Planning trip");

    let response = state.planner.process_request(&request).await.map_err(|err| {
        warn!(stage = err.stage(), error = %err, "Planning failed");
        ApiError::from(err)
    })?;

    Ok(Json(response))
}

/// GET /health - Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Create router with all API endpoints
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", routing::get(health_check))
        .route("/api/plan", routing::post(plan_trip))
}
