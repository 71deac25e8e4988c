//! Domain layer: the record/wizard state machine, field validation, the
//! template catalog, and the services backing sharing, saved templates,
//! drafts, and the AI-usage quota.

pub mod ai_usage_service;
pub mod commands;
pub mod editor_service;
pub mod saved_template_service;
pub mod share_service;
pub mod templates;
pub mod validators;
pub mod wizard;

pub use ai_usage_service::AiUsageService;
pub use editor_service::EditorService;
pub use saved_template_service::SavedTemplateService;
pub use share_service::{ShareError, ShareService};
pub use wizard::WizardState;
