//! Storage abstraction traits.
//!
//! The domain layer works against these interfaces so the row store stays
//! an opaque insert/point-lookup/update surface; the SQLite implementation
//! lives in `storage::sqlite`.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::{AiUsage, BiodataData, SavedTemplate, SharedBiodata};

/// The locally persisted in-progress record, stored under a single fixed
/// key. All fields are optional at this boundary: a stored shape with
/// missing fields must load as a partial record, never fail.
#[async_trait]
pub trait DraftStorage: Send + Sync {
    /// Write the draft, overwriting whatever was there
    async fn save_draft(&self, record: &BiodataData) -> Result<()>;

    /// Load the draft, if one exists
    async fn load_draft(&self) -> Result<Option<BiodataData>>;

    /// Remove the draft key entirely
    async fn clear_draft(&self) -> Result<()>;
}

/// Daily-quota counter for the text-improvement helper
#[async_trait]
pub trait AiUsageStorage: Send + Sync {
    async fn load_usage(&self) -> Result<Option<AiUsage>>;
    async fn save_usage(&self, usage: &AiUsage) -> Result<()>;
}

/// Shared-link rows. Immutable once created, except for the view counter;
/// rows are never deleted here (expiry is advisory, not a purge).
#[async_trait]
pub trait SharedBiodataStorage: Send + Sync {
    /// Insert a new share row
    async fn insert_share(&self, share: &SharedBiodata) -> Result<()>;

    /// Point lookup by id
    async fn get_share(&self, id: &str) -> Result<Option<SharedBiodata>>;

    /// Overwrite the view counter with a caller-computed value
    async fn set_view_count(&self, id: &str, view_count: i64) -> Result<()>;
}

/// Saved-template rows, scoped to a session pseudo-identity. Every
/// mutating operation filters by session id so one session cannot touch
/// another session's rows.
#[async_trait]
pub trait SavedTemplateStorage: Send + Sync {
    async fn insert_template(&self, template: &SavedTemplate) -> Result<()>;

    async fn get_template(&self, id: &str, session_id: &str) -> Result<Option<SavedTemplate>>;

    /// All templates for a session, newest first
    async fn list_templates(&self, session_id: &str) -> Result<Vec<SavedTemplate>>;

    /// Partial update; absent fields keep their stored value.
    /// Returns whether a row matched.
    async fn update_template(
        &self,
        id: &str,
        session_id: &str,
        template_name: Option<&str>,
        is_favorite: Option<bool>,
        updated_at: DateTime<Utc>,
    ) -> Result<bool>;

    /// Returns whether a row matched
    async fn delete_template(&self, id: &str, session_id: &str) -> Result<bool>;
}
