//! # REST API for Share Links
//!
//! Publishing a record under a time-limited public id, and resolving one.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use shared::{CreateShareRequest, CreateShareResponse};
use tracing::{error, info};

use crate::domain::commands::share::CreateShareCommand;
use crate::domain::ShareError;
use crate::rest::AppState;

/// Publish the posted record as a share link
pub async fn create_share(
    State(state): State<AppState>,
    Json(request): Json<CreateShareRequest>,
) -> impl IntoResponse {
    info!("POST /api/share - expiry_hours: {}", request.expiry_hours);

    let command = CreateShareCommand {
        data: request.data,
        customization: request.customization,
        expiry_hours: request.expiry_hours,
    };

    match state.share_service.create_share(command).await {
        Ok(result) => {
            let response = CreateShareResponse {
                share_id: result.share_id,
                share_url: result.share_url,
                qr_code_url: result.qr_code_url,
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e @ ShareError::InvalidExpiry(_)) => {
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
        Err(e) => {
            error!("Failed to create share: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error creating share").into_response()
        }
    }
}

/// Resolve a share link and count the view
pub async fn get_share(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/share/{}", id);

    match state.share_service.resolve_share(&id).await {
        Ok(result) => (StatusCode::OK, Json(result.share)).into_response(),
        Err(e @ ShareError::NotFound) => (StatusCode::NOT_FOUND, e.to_string()).into_response(),
        Err(e) => {
            error!("Failed to resolve share {}: {}", id, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error resolving share").into_response()
        }
    }
}
