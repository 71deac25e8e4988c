//! # REST API for Templates
//!
//! The static catalog, session-token minting, and CRUD over a session's
//! saved templates. Every saved-template route requires a `session_id`
//! query parameter; a missing or wrong one reads as "not found".

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use shared::{generate_session_id, SaveTemplateRequest, UpdateSavedTemplateRequest};
use tracing::{error, info};

use crate::domain::commands::saved_templates::{SaveTemplateCommand, UpdateSavedTemplateCommand};
use crate::domain::templates;
use crate::rest::AppState;

#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: String,
}

/// The full template catalog in picker order
pub async fn get_catalog() -> impl IntoResponse {
    info!("GET /api/templates/catalog");
    Json(templates::catalog())
}

/// Mint a fresh session token for scoping saved templates
pub async fn create_session() -> impl IntoResponse {
    info!("POST /api/sessions");
    (StatusCode::CREATED, Json(SessionResponse { session_id: generate_session_id() }))
}

/// Save the posted record as a named template
pub async fn save_template(
    State(state): State<AppState>,
    Json(request): Json<SaveTemplateRequest>,
) -> impl IntoResponse {
    info!("POST /api/saved-templates - name: {}", request.template_name);

    let command = SaveTemplateCommand {
        session_id: request.session_id,
        template_name: request.template_name,
        biodata_data: request.biodata_data,
        template_id: request.template_id,
        customization: request.customization,
    };

    match state.saved_template_service.save_template(command).await {
        Ok(template) => (StatusCode::CREATED, Json(template)).into_response(),
        Err(e) => {
            error!("Failed to save template: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error saving template").into_response()
        }
    }
}

/// List the session's templates, newest first
pub async fn list_templates(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
) -> impl IntoResponse {
    info!("GET /api/saved-templates - session: {}", query.session_id);

    match state.saved_template_service.list_templates(&query.session_id).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to list templates: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing templates").into_response()
        }
    }
}

/// Rename or re-flag a template
pub async fn update_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<SessionQuery>,
    Json(request): Json<UpdateSavedTemplateRequest>,
) -> impl IntoResponse {
    info!("PUT /api/saved-templates/{} - request: {:?}", id, request);

    let command = UpdateSavedTemplateCommand {
        template_name: request.template_name,
        is_favorite: request.is_favorite,
    };

    match state.saved_template_service.update_template(&id, &query.session_id, command).await {
        Ok(Some(template)) => (StatusCode::OK, Json(template)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Template not found").into_response(),
        Err(e) => {
            error!("Failed to update template {}: {}", id, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error updating template").into_response()
        }
    }
}

/// Flip the favorite flag
pub async fn toggle_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<SessionQuery>,
) -> impl IntoResponse {
    info!("POST /api/saved-templates/{}/favorite", id);

    match state.saved_template_service.toggle_favorite(&id, &query.session_id).await {
        Ok(Some(template)) => (StatusCode::OK, Json(template)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Template not found").into_response(),
        Err(e) => {
            error!("Failed to toggle favorite on {}: {}", id, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error updating template").into_response()
        }
    }
}

/// Copy a template into a fresh row
pub async fn duplicate_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<SessionQuery>,
) -> impl IntoResponse {
    info!("POST /api/saved-templates/{}/duplicate", id);

    match state.saved_template_service.duplicate_template(&id, &query.session_id).await {
        Ok(Some(template)) => (StatusCode::CREATED, Json(template)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Template not found").into_response(),
        Err(e) => {
            error!("Failed to duplicate template {}: {}", id, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error duplicating template").into_response()
        }
    }
}

/// Delete a template
pub async fn delete_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<SessionQuery>,
) -> impl IntoResponse {
    info!("DELETE /api/saved-templates/{}", id);

    match state.saved_template_service.delete_template(&id, &query.session_id).await {
        Ok(true) => (StatusCode::NO_CONTENT, "").into_response(),
        Ok(false) => (StatusCode::NOT_FOUND, "Template not found").into_response(),
        Err(e) => {
            error!("Failed to delete template {}: {}", id, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error deleting template").into_response()
        }
    }
}
