use anyhow::Result;
use async_trait::async_trait;
use shared::BiodataData;

use crate::storage::sqlite::DbConnection;
use crate::storage::traits::DraftStorage;

// Fixed key the single in-progress record lives under
const DRAFT_KEY: &str = "biodata_draft";

/// Draft persistence on top of the key-value table
#[derive(Clone)]
pub struct DraftRepository {
    connection: DbConnection,
}

impl DraftRepository {
    pub fn new(connection: DbConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl DraftStorage for DraftRepository {
    async fn save_draft(&self, record: &BiodataData) -> Result<()> {
        let json = serde_json::to_string(record)?;
        self.connection.put_value(DRAFT_KEY, &json).await
    }

    async fn load_draft(&self) -> Result<Option<BiodataData>> {
        match self.connection.get_value(DRAFT_KEY).await? {
            Some(json) => {
                // A stored shape with missing sections loads as a partial
                // record; a corrupt blob is treated as no draft at all.
                match serde_json::from_str(&json) {
                    Ok(record) => Ok(Some(record)),
                    Err(e) => {
                        tracing::warn!("discarding unreadable draft: {}", e);
                        Ok(None)
                    }
                }
            }
            None => Ok(None),
        }
    }

    async fn clear_draft(&self) -> Result<()> {
        self.connection.delete_value(DRAFT_KEY).await?;
        Ok(())
    }
}
