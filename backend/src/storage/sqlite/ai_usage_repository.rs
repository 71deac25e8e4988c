use anyhow::Result;
use async_trait::async_trait;
use shared::AiUsage;

use crate::storage::sqlite::DbConnection;
use crate::storage::traits::AiUsageStorage;

const AI_USAGE_KEY: &str = "biodata_ai_usage";

/// Quota-counter persistence on top of the key-value table
#[derive(Clone)]
pub struct AiUsageRepository {
    connection: DbConnection,
}

impl AiUsageRepository {
    pub fn new(connection: DbConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl AiUsageStorage for AiUsageRepository {
    async fn load_usage(&self) -> Result<Option<AiUsage>> {
        match self.connection.get_value(AI_USAGE_KEY).await? {
            Some(json) => Ok(serde_json::from_str(&json).ok()),
            None => Ok(None),
        }
    }

    async fn save_usage(&self, usage: &AiUsage) -> Result<()> {
        let json = serde_json::to_string(usage)?;
        self.connection.put_value(AI_USAGE_KEY, &json).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn test_save_and_load_usage() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let repo = AiUsageRepository::new(db);

        let usage = AiUsage {
            count: 3,
            reset_at: Utc.with_ymd_and_hms(2024, 6, 2, 0, 0, 0).unwrap(),
        };
        repo.save_usage(&usage).await.expect("Failed to save usage");

        let loaded = repo.load_usage().await.expect("Failed to load usage");
        assert_eq!(loaded, Some(usage));
    }

    #[tokio::test]
    async fn test_load_without_usage() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let repo = AiUsageRepository::new(db);

        let loaded = repo.load_usage().await.expect("Failed to load usage");
        assert!(loaded.is_none());
    }
}
