use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, Level};

use biodata_studio_backend::domain::{
    AiUsageService, EditorService, SavedTemplateService, ShareService,
};
use biodata_studio_backend::rest::{create_router, AppState};
use biodata_studio_backend::storage::sqlite::{
    AiUsageRepository, DbConnection, DraftRepository, SavedTemplateRepository,
    SharedBiodataRepository,
};

const DEFAULT_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_BASE_URL: &str = "http://localhost:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("Setting up database");
    let db = DbConnection::init().await?;

    // Wire repositories into services
    let editor_service = EditorService::new(Arc::new(DraftRepository::new(db.clone())));
    let base_url = std::env::var("BIODATA_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let share_service =
        ShareService::new(Arc::new(SharedBiodataRepository::new(db.clone())), base_url);
    let saved_template_service =
        SavedTemplateService::new(Arc::new(SavedTemplateRepository::new(db.clone())));
    let ai_usage_service = AiUsageService::new(Arc::new(AiUsageRepository::new(db)));

    // Resume any stored draft before serving traffic
    editor_service.bootstrap().await?;

    let state = AppState {
        editor_service,
        share_service,
        saved_template_service,
        ai_usage_service,
    };

    let app = create_router(state);

    // Start the server
    let addr: SocketAddr = std::env::var("BIODATA_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()?;
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
