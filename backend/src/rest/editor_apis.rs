//! # REST API for the Editing Session
//!
//! Endpoints for reading and mutating the single editing session: section
//! patches, the photo, customization, wizard navigation, and the reset.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use shared::{CustomizationUpdate, SectionKey};
use tracing::{error, info};

use crate::rest::AppState;

#[derive(Debug, Deserialize)]
pub struct PhotoUpdateRequest {
    /// Data URL, or null to remove the photo
    pub photo: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PreviewModeRequest {
    pub preview: bool,
}

#[derive(Debug, Deserialize)]
pub struct WizardStepRequest {
    pub step: SectionKey,
}

/// Get the current editing session snapshot
pub async fn get_snapshot(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/editor");
    Json(state.editor_service.snapshot().await)
}

/// Merge a field patch into one section
pub async fn update_section(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(patch): Json<serde_json::Value>,
) -> impl IntoResponse {
    info!("PUT /api/editor/sections/{}", key);

    let Ok(section) = key.parse::<SectionKey>() else {
        return (StatusCode::BAD_REQUEST, format!("Unknown section: {}", key)).into_response();
    };

    match state.editor_service.update_section(section, &patch).await {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        Err(e) => {
            error!("Failed to update section {}: {}", key, e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// Set or remove the profile photo
pub async fn update_photo(
    State(state): State<AppState>,
    Json(request): Json<PhotoUpdateRequest>,
) -> impl IntoResponse {
    info!("PUT /api/editor/photo (present: {})", request.photo.is_some());

    match state.editor_service.update_photo(request.photo).await {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        Err(e) => {
            error!("Failed to update photo: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error saving photo").into_response()
        }
    }
}

/// Remove the profile photo
pub async fn remove_photo(State(state): State<AppState>) -> impl IntoResponse {
    info!("DELETE /api/editor/photo");

    match state.editor_service.update_photo(None).await {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        Err(e) => {
            error!("Failed to remove photo: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error removing photo").into_response()
        }
    }
}

/// Apply a partial customization update
pub async fn update_customization(
    State(state): State<AppState>,
    Json(update): Json<CustomizationUpdate>,
) -> impl IntoResponse {
    info!("PATCH /api/editor/customization - request: {:?}", update);
    Json(state.editor_service.update_customization(update).await)
}

/// Advance the wizard one step
pub async fn next_step(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/editor/wizard/next");
    Json(state.editor_service.next_step().await)
}

/// Move the wizard back one step
pub async fn previous_step(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/editor/wizard/previous");
    Json(state.editor_service.previous_step().await)
}

/// Jump directly to a named step
pub async fn jump_to_step(
    State(state): State<AppState>,
    Json(request): Json<WizardStepRequest>,
) -> impl IntoResponse {
    info!("PUT /api/editor/wizard/step - step: {}", request.step);
    Json(state.editor_service.jump_to(request.step).await)
}

/// Toggle preview mode
pub async fn set_preview_mode(
    State(state): State<AppState>,
    Json(request): Json<PreviewModeRequest>,
) -> impl IntoResponse {
    info!("PUT /api/editor/preview - preview: {}", request.preview);
    Json(state.editor_service.set_preview_mode(request.preview).await)
}

/// Per-step completion for the progress indicator
pub async fn get_progress(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/editor/progress");
    Json(state.editor_service.progress().await)
}

/// Reset the session and discard the stored draft
pub async fn clear_all(State(state): State<AppState>) -> impl IntoResponse {
    info!("DELETE /api/editor");

    match state.editor_service.clear_all().await {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        Err(e) => {
            error!("Failed to clear session: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error clearing session").into_response()
        }
    }
}
