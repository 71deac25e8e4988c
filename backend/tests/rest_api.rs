//! End-to-end tests over the HTTP router, backed by an in-memory database.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use biodata_studio_backend::domain::{
    AiUsageService, EditorService, SavedTemplateService, ShareService,
};
use biodata_studio_backend::rest::{create_router, AppState};
use biodata_studio_backend::storage::sqlite::{
    AiUsageRepository, DbConnection, DraftRepository, SavedTemplateRepository,
    SharedBiodataRepository,
};
use biodata_studio_backend::storage::SharedBiodataStorage;

async fn test_app() -> Router {
    let db = DbConnection::init_test().await.expect("Failed to create test database");
    app_with_db(db)
}

fn app_with_db(db: DbConnection) -> Router {
    let state = AppState {
        editor_service: EditorService::new(Arc::new(DraftRepository::new(db.clone()))),
        share_service: ShareService::new(
            Arc::new(SharedBiodataRepository::new(db.clone())),
            "http://localhost:3000".to_string(),
        ),
        saved_template_service: SavedTemplateService::new(Arc::new(SavedTemplateRepository::new(
            db.clone(),
        ))),
        ai_usage_service: AiUsageService::new(Arc::new(AiUsageRepository::new(db))),
    };

    create_router(state)
}

fn request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_fresh_editor_snapshot() {
    let app = test_app().await;

    let response = app.oneshot(request(Method::GET, "/api/editor", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["currentStep"], "personal");
    assert_eq!(body["previewMode"], false);
    assert_eq!(body["customization"]["templateId"], "modern-1");
    assert_eq!(body["customization"]["primaryColor"], "#2563eb");
}

#[tokio::test]
async fn test_section_update_round_trip() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(request(
            Method::PUT,
            "/api/editor/sections/personal",
            Some(json!({ "fullName": "Anita Desai", "dateOfBirth": "1995-03-10" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["data"]["personal"]["fullName"], "Anita Desai");
    // age is derived from the posted date of birth
    assert_ne!(body["data"]["personal"]["age"], "");

    let progress =
        app.oneshot(request(Method::GET, "/api/editor/progress", None)).await.unwrap();
    let progress_body = json_body(progress).await;
    let steps = progress_body["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 6);
    assert!(steps[0]["completed"].as_u64().unwrap() >= 2);
}

#[tokio::test]
async fn test_unknown_section_is_bad_request() {
    let app = test_app().await;

    let response = app
        .oneshot(request(Method::PUT, "/api/editor/sections/salary", Some(json!({}))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_wizard_navigation_endpoints() {
    let app = test_app().await;

    let response =
        app.clone().oneshot(request(Method::POST, "/api/editor/wizard/next", None)).await.unwrap();
    assert_eq!(json_body(response).await["currentStep"], "education");

    let response = app
        .clone()
        .oneshot(request(
            Method::PUT,
            "/api/editor/wizard/step",
            Some(json!({ "step": "horoscope" })),
        ))
        .await
        .unwrap();
    assert_eq!(json_body(response).await["currentStep"], "horoscope");

    let response =
        app.oneshot(request(Method::POST, "/api/editor/wizard/previous", None)).await.unwrap();
    assert_eq!(json_body(response).await["currentStep"], "lifestyle");
}

#[tokio::test]
async fn test_photo_set_and_remove() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(request(
            Method::PUT,
            "/api/editor/photo",
            Some(json!({ "photo": "data:image/png;base64,AAAA" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["data"]["profilePhoto"], "data:image/png;base64,AAAA");

    let response =
        app.oneshot(request(Method::DELETE, "/api/editor/photo", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(json_body(response).await["data"]["profilePhoto"].is_null());
}

#[tokio::test]
async fn test_clear_resets_session() {
    let app = test_app().await;

    app.clone()
        .oneshot(request(
            Method::PUT,
            "/api/editor/sections/contact",
            Some(json!({ "city": "Pune" })),
        ))
        .await
        .unwrap();

    let response = app.clone().oneshot(request(Method::DELETE, "/api/editor", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert!(body["data"]["contact"].is_null());
    assert_eq!(body["currentStep"], "personal");
}

#[tokio::test]
async fn test_validate_endpoint() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/api/validate",
            Some(json!({ "field": "email", "value": "not-an-email" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["is_valid"], false);

    let response = app
        .oneshot(request(
            Method::POST,
            "/api/validate",
            Some(json!({ "field": "height", "value": "5'6\"" })),
        ))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["is_valid"], true);
}

#[tokio::test]
async fn test_share_lifecycle() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/api/share",
            Some(json!({
                "data": { "personal": { "fullName": "Anita Desai" } },
                "customization": {
                    "templateId": "traditional-2",
                    "primaryColor": "#2563eb",
                    "fontFamily": "Inter, sans-serif",
                    "showPhoto": true,
                    "hiddenSections": []
                },
                "expiryHours": 24
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = json_body(response).await;
    let share_id = created["shareId"].as_str().unwrap().to_string();
    assert_eq!(
        created["shareUrl"],
        format!("http://localhost:3000/view/{}", share_id)
    );
    assert!(created["qrCodeUrl"].as_str().unwrap().starts_with("https://api.qrserver.com/"));

    // resolving counts a view each time
    let uri = format!("/api/share/{}", share_id);
    let response = app.clone().oneshot(request(Method::GET, &uri, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["viewCount"], 1);
    assert_eq!(body["templateId"], "traditional-2");
    assert_eq!(body["data"]["personal"]["fullName"], "Anita Desai");

    let response = app.clone().oneshot(request(Method::GET, &uri, None)).await.unwrap();
    assert_eq!(json_body(response).await["viewCount"], 2);

    let response =
        app.oneshot(request(Method::GET, "/api/share/missing-id", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_resolving_past_expiry_still_returns_the_row() {
    // expiry is advisory: rows are not purged and reads do not reject them
    let db = DbConnection::init_test().await.expect("Failed to create test database");
    let repo = SharedBiodataRepository::new(db.clone());

    let share = shared::SharedBiodata {
        id: "stale-share".to_string(),
        data: shared::BiodataData::default(),
        template_id: shared::TemplateId::Modern1,
        customization: shared::TemplateCustomization::default(),
        expires_at: chrono::Utc::now() - chrono::Duration::hours(25),
        view_count: 0,
    };
    repo.insert_share(&share).await.expect("Failed to seed share");

    let app = app_with_db(db);
    let response =
        app.oneshot(request(Method::GET, "/api/share/stale-share", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["viewCount"], 1);
    assert_eq!(body["id"], "stale-share");
}

#[tokio::test]
async fn test_share_rejects_arbitrary_expiry() {
    let app = test_app().await;

    let response = app
        .oneshot(request(
            Method::POST,
            "/api/share",
            Some(json!({
                "data": {},
                "customization": {
                    "templateId": "modern-1",
                    "primaryColor": "#2563eb",
                    "fontFamily": "Inter, sans-serif",
                    "showPhoto": true,
                    "hiddenSections": []
                },
                "expiryHours": 72
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_template_catalog() {
    let app = test_app().await;

    let response =
        app.oneshot(request(Method::GET, "/api/templates/catalog", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 15);
    assert_eq!(entries[0]["id"], "modern-1");
    assert_eq!(entries[0]["renderer"], "modern");
}

#[tokio::test]
async fn test_saved_template_lifecycle() {
    let app = test_app().await;

    // mint a session
    let response = app.clone().oneshot(request(Method::POST, "/api/sessions", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let session = json_body(response).await["session_id"].as_str().unwrap().to_string();
    assert!(session.starts_with("sess_"));

    // save
    let response = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/api/saved-templates",
            Some(json!({
                "session_id": session,
                "template_name": "Wedding Draft",
                "biodata_data": { "personal": { "fullName": "Anita Desai" } },
                "template_id": "modern-2",
                "customization": {
                    "templateId": "modern-2",
                    "primaryColor": "#2563eb",
                    "fontFamily": "Inter, sans-serif",
                    "showPhoto": true,
                    "hiddenSections": []
                }
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let saved = json_body(response).await;
    let id = saved["id"].as_str().unwrap().to_string();

    // list is session-scoped
    let uri = format!("/api/saved-templates?session_id={}", session);
    let response = app.clone().oneshot(request(Method::GET, &uri, None)).await.unwrap();
    let listed = json_body(response).await;
    assert_eq!(listed["templates"].as_array().unwrap().len(), 1);

    let response = app
        .clone()
        .oneshot(request(Method::GET, "/api/saved-templates?session_id=sess_other", None))
        .await
        .unwrap();
    let other = json_body(response).await;
    assert!(other["templates"].as_array().unwrap().is_empty());

    // rename
    let uri = format!("/api/saved-templates/{}?session_id={}", id, session);
    let response = app
        .clone()
        .oneshot(request(Method::PUT, &uri, Some(json!({ "template_name": "Final Draft" }))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["template_name"], "Final Draft");

    // favorite
    let uri = format!("/api/saved-templates/{}/favorite?session_id={}", id, session);
    let response = app.clone().oneshot(request(Method::POST, &uri, None)).await.unwrap();
    assert_eq!(json_body(response).await["is_favorite"], true);

    // duplicate
    let uri = format!("/api/saved-templates/{}/duplicate?session_id={}", id, session);
    let response = app.clone().oneshot(request(Method::POST, &uri, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let copy = json_body(response).await;
    assert_eq!(copy["template_name"], "Final Draft (Copy)");
    assert_eq!(copy["is_favorite"], false);

    // delete original
    let uri = format!("/api/saved-templates/{}?session_id={}", id, session);
    let response = app.clone().oneshot(request(Method::DELETE, &uri, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(request(Method::DELETE, &uri, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_ai_quota_exhaustion_answers_429() {
    let app = test_app().await;

    let response = app.clone().oneshot(request(Method::GET, "/api/ai-usage", None)).await.unwrap();
    let body = json_body(response).await;
    assert_eq!(body["count"], 0);
    assert_eq!(body["limit"], 5);

    for _ in 0..5 {
        let response =
            app.clone().oneshot(request(Method::POST, "/api/ai-usage/consume", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response =
        app.oneshot(request(Method::POST, "/api/ai-usage/consume", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let body = json_body(response).await;
    assert_eq!(body["remaining"], 0);
}
