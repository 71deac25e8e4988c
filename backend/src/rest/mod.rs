//! # REST API Interface Layer
//!
//! HTTP endpoints for the biodata editor. This layer handles:
//! - Request/response serialization
//! - Error translation from domain to HTTP status codes
//! - CORS configuration for the frontend
//! - Request logging

pub mod ai_apis;
pub mod editor_apis;
pub mod share_apis;
pub mod template_apis;
pub mod validation_apis;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::domain::{
    AiUsageService, EditorService, SavedTemplateService, ShareService,
};

/// Application state shared across handlers. Services are cheap clones
/// (Arc-backed internally).
#[derive(Clone)]
pub struct AppState {
    pub editor_service: EditorService,
    pub share_service: ShareService,
    pub saved_template_service: SavedTemplateService,
    pub ai_usage_service: AiUsageService,
}

/// Build the full application router with CORS applied
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    let api_routes = Router::new()
        // editing session
        .route("/editor", get(editor_apis::get_snapshot))
        .route("/editor", delete(editor_apis::clear_all))
        .route("/editor/sections/:key", put(editor_apis::update_section))
        .route("/editor/photo", put(editor_apis::update_photo))
        .route("/editor/photo", delete(editor_apis::remove_photo))
        .route("/editor/customization", patch(editor_apis::update_customization))
        .route("/editor/wizard/next", post(editor_apis::next_step))
        .route("/editor/wizard/previous", post(editor_apis::previous_step))
        .route("/editor/wizard/step", put(editor_apis::jump_to_step))
        .route("/editor/preview", put(editor_apis::set_preview_mode))
        .route("/editor/progress", get(editor_apis::get_progress))
        // field validation
        .route("/validate", post(validation_apis::validate_field))
        // sharing
        .route("/share", post(share_apis::create_share))
        .route("/share/:id", get(share_apis::get_share))
        // template catalog and saved templates
        .route("/templates/catalog", get(template_apis::get_catalog))
        .route("/sessions", post(template_apis::create_session))
        .route("/saved-templates", post(template_apis::save_template))
        .route("/saved-templates", get(template_apis::list_templates))
        .route("/saved-templates/:id", put(template_apis::update_template))
        .route("/saved-templates/:id", delete(template_apis::delete_template))
        .route("/saved-templates/:id/favorite", post(template_apis::toggle_favorite))
        .route("/saved-templates/:id/duplicate", post(template_apis::duplicate_template))
        // AI quota
        .route("/ai-usage", get(ai_apis::get_usage))
        .route("/ai-usage/consume", post(ai_apis::consume_usage));

    Router::new().nest("/api", api_routes).layer(cors).with_state(state)
}
