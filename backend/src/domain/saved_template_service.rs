//! Session-scoped saved templates: full record snapshots a user can name,
//! favorite, duplicate, and restore later. Scoping is by an opaque session
//! token the client presents; the storage layer filters every operation by
//! it, so "not found" and "not yours" are indistinguishable here.

use anyhow::Result;
use chrono::Utc;
use shared::{SavedTemplate, SavedTemplateListResponse};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::domain::commands::saved_templates::{SaveTemplateCommand, UpdateSavedTemplateCommand};
use crate::storage::SavedTemplateStorage;

const DUPLICATE_SUFFIX: &str = " (Copy)";

/// Service for managing a session's saved templates
#[derive(Clone)]
pub struct SavedTemplateService {
    storage: Arc<dyn SavedTemplateStorage>,
}

impl SavedTemplateService {
    pub fn new(storage: Arc<dyn SavedTemplateStorage>) -> Self {
        Self { storage }
    }

    /// Snapshot a record under a new template row
    pub async fn save_template(&self, command: SaveTemplateCommand) -> Result<SavedTemplate> {
        let now = Utc::now();
        let template = SavedTemplate {
            id: Uuid::new_v4().to_string(),
            user_session_id: command.session_id,
            template_name: command.template_name,
            biodata_data: command.biodata_data,
            template_id: command.template_id,
            customization: command.customization,
            created_at: now,
            updated_at: now,
            is_favorite: false,
        };

        self.storage.insert_template(&template).await?;

        info!("Saved template {} for session {}", template.id, template.user_session_id);

        Ok(template)
    }

    /// All of a session's templates, newest first
    pub async fn list_templates(&self, session_id: &str) -> Result<SavedTemplateListResponse> {
        let templates = self.storage.list_templates(session_id).await?;
        Ok(SavedTemplateListResponse { templates })
    }

    pub async fn get_template(&self, id: &str, session_id: &str) -> Result<Option<SavedTemplate>> {
        self.storage.get_template(id, session_id).await
    }

    /// Rename and/or re-flag a template. Returns the updated row, or `None`
    /// when the session has no such template.
    pub async fn update_template(
        &self,
        id: &str,
        session_id: &str,
        command: UpdateSavedTemplateCommand,
    ) -> Result<Option<SavedTemplate>> {
        let matched = self
            .storage
            .update_template(
                id,
                session_id,
                command.template_name.as_deref(),
                command.is_favorite,
                Utc::now(),
            )
            .await?;

        if !matched {
            return Ok(None);
        }

        self.storage.get_template(id, session_id).await
    }

    /// Flip the favorite flag. Returns the updated row, or `None` when the
    /// session has no such template.
    pub async fn toggle_favorite(&self, id: &str, session_id: &str) -> Result<Option<SavedTemplate>> {
        let Some(existing) = self.storage.get_template(id, session_id).await? else {
            return Ok(None);
        };

        self.update_template(
            id,
            session_id,
            UpdateSavedTemplateCommand { template_name: None, is_favorite: Some(!existing.is_favorite) },
        )
        .await
    }

    /// Copy a template into a fresh row with a marked name. The copy is
    /// never a favorite regardless of the source.
    pub async fn duplicate_template(&self, id: &str, session_id: &str) -> Result<Option<SavedTemplate>> {
        let Some(source) = self.storage.get_template(id, session_id).await? else {
            return Ok(None);
        };

        let now = Utc::now();
        let copy = SavedTemplate {
            id: Uuid::new_v4().to_string(),
            user_session_id: source.user_session_id,
            template_name: format!("{}{}", source.template_name, DUPLICATE_SUFFIX),
            biodata_data: source.biodata_data,
            template_id: source.template_id,
            customization: source.customization,
            created_at: now,
            updated_at: now,
            is_favorite: false,
        };

        self.storage.insert_template(&copy).await?;

        info!("Duplicated template {} as {}", id, copy.id);

        Ok(Some(copy))
    }

    /// Returns whether the session had such a template
    pub async fn delete_template(&self, id: &str, session_id: &str) -> Result<bool> {
        self.storage.delete_template(id, session_id).await
    }
}
