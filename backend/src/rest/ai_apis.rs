//! # REST API for the AI Quota
//!
//! Reading the daily text-improvement quota and spending a unit of it.
//! A refused spend answers 429 with the current quota state in the body.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use crate::rest::AppState;

/// Current quota state
pub async fn get_usage(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/ai-usage");

    match state.ai_usage_service.usage().await {
        Ok(usage) => (StatusCode::OK, Json(usage)).into_response(),
        Err(e) => {
            error!("Failed to read AI usage: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error reading usage").into_response()
        }
    }
}

/// Spend one unit of today's quota
pub async fn consume_usage(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/ai-usage/consume");

    match state.ai_usage_service.consume().await {
        Ok(result) if result.allowed => (StatusCode::OK, Json(result.usage)).into_response(),
        Ok(result) => (StatusCode::TOO_MANY_REQUESTS, Json(result.usage)).into_response(),
        Err(e) => {
            error!("Failed to consume AI usage: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error updating usage").into_response()
        }
    }
}
