//! SQLite-backed storage: a shared connection plus one repository per
//! logical table.

mod ai_usage_repository;
mod connection;
mod draft_repository;
mod saved_template_repository;
mod shared_biodata_repository;

pub use ai_usage_repository::AiUsageRepository;
pub use connection::DbConnection;
pub use draft_repository::DraftRepository;
pub use saved_template_repository::SavedTemplateRepository;
pub use shared_biodata_repository::SharedBiodataRepository;
