//! The single mutable editing session.
//!
//! One record is edited at a time, so the session is a mutex-held singleton:
//! record, customization, wizard position, and the preview flag. Every
//! record mutation writes the draft through to storage after the lock is
//! updated, so a restart resumes from the last edit. Customization and
//! wizard position are deliberately not persisted; only the record is.

use anyhow::Result;
use serde_json::Value;
use shared::{
    today_local, BiodataData, CustomizationUpdate, EditorSnapshot, SectionKey,
    TemplateCustomization, WizardProgressResponse,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use crate::domain::wizard::WizardState;
use crate::storage::DraftStorage;

struct EditorState {
    data: BiodataData,
    customization: TemplateCustomization,
    wizard: WizardState,
    preview_mode: bool,
}

impl EditorState {
    fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            data: self.data.clone(),
            customization: self.customization.clone(),
            current_step: self.wizard.current(),
            preview_mode: self.preview_mode,
        }
    }
}

/// Service owning the editing session and its draft persistence
#[derive(Clone)]
pub struct EditorService {
    state: Arc<Mutex<EditorState>>,
    drafts: Arc<dyn DraftStorage>,
}

impl EditorService {
    pub fn new(drafts: Arc<dyn DraftStorage>) -> Self {
        let state = EditorState {
            data: BiodataData::default(),
            customization: TemplateCustomization::default(),
            wizard: WizardState::new(),
            preview_mode: false,
        };
        Self { state: Arc::new(Mutex::new(state)), drafts }
    }

    /// Load the persisted draft, if any, into the session. Called once at
    /// startup, before the session is reachable.
    pub async fn bootstrap(&self) -> Result<()> {
        if let Some(draft) = self.drafts.load_draft().await? {
            info!("Resuming draft for {:?}", draft.full_name());
            self.state.lock().await.data = draft;
        }
        Ok(())
    }

    pub async fn snapshot(&self) -> EditorSnapshot {
        self.state.lock().await.snapshot()
    }

    /// Merge a partial field patch into one section and persist the result
    pub async fn update_section(&self, key: SectionKey, patch: &Value) -> Result<EditorSnapshot> {
        let mut state = self.state.lock().await;
        state.data.merge_section(key, patch, today_local())?;
        let snapshot = state.snapshot();
        drop(state);

        self.drafts.save_draft(&snapshot.data).await?;
        Ok(snapshot)
    }

    /// Replace (or remove) the embedded profile photo and persist
    pub async fn update_photo(&self, photo: Option<String>) -> Result<EditorSnapshot> {
        let mut state = self.state.lock().await;
        state.data.profile_photo = photo;
        let snapshot = state.snapshot();
        drop(state);

        self.drafts.save_draft(&snapshot.data).await?;
        Ok(snapshot)
    }

    /// Apply a partial customization update. Not persisted to the draft.
    pub async fn update_customization(&self, update: CustomizationUpdate) -> EditorSnapshot {
        let mut state = self.state.lock().await;
        let customization = &mut state.customization;
        if let Some(template_id) = update.template_id {
            customization.template_id = template_id;
        }
        if let Some(primary_color) = update.primary_color {
            customization.primary_color = primary_color;
        }
        if let Some(font_family) = update.font_family {
            customization.font_family = font_family;
        }
        if let Some(show_photo) = update.show_photo {
            customization.show_photo = show_photo;
        }
        if let Some(hidden_sections) = update.hidden_sections {
            customization.hidden_sections = hidden_sections;
        }
        state.snapshot()
    }

    pub async fn next_step(&self) -> EditorSnapshot {
        let mut state = self.state.lock().await;
        state.wizard.next();
        state.snapshot()
    }

    pub async fn previous_step(&self) -> EditorSnapshot {
        let mut state = self.state.lock().await;
        state.wizard.previous();
        state.snapshot()
    }

    pub async fn jump_to(&self, step: SectionKey) -> EditorSnapshot {
        let mut state = self.state.lock().await;
        state.wizard.jump_to(step);
        state.snapshot()
    }

    pub async fn set_preview_mode(&self, preview: bool) -> EditorSnapshot {
        let mut state = self.state.lock().await;
        state.preview_mode = preview;
        state.snapshot()
    }

    pub async fn progress(&self) -> WizardProgressResponse {
        let state = self.state.lock().await;
        state.wizard.progress(&state.data)
    }

    /// Reset the whole session: empty record, default customization, first
    /// wizard step, and no stored draft
    pub async fn clear_all(&self) -> Result<EditorSnapshot> {
        let mut state = self.state.lock().await;
        state.data = BiodataData::default();
        state.customization = TemplateCustomization::default();
        state.wizard = WizardState::new();
        state.preview_mode = false;
        let snapshot = state.snapshot();
        drop(state);

        self.drafts.clear_draft().await?;
        info!("Cleared editing session and draft");
        Ok(snapshot)
    }
}
