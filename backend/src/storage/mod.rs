//! Storage layer: trait definitions plus the SQLite implementation.

pub mod sqlite;
pub mod traits;

pub use sqlite::DbConnection;
pub use traits::{AiUsageStorage, DraftStorage, SavedTemplateStorage, SharedBiodataStorage};
