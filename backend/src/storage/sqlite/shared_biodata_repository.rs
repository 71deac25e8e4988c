use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::{SharedBiodata, TemplateId};
use sqlx::Row;

use crate::storage::sqlite::DbConnection;
use crate::storage::traits::SharedBiodataStorage;

/// Share-link rows in the `shared_biodata` table. Record and customization
/// are stored as JSON text; timestamps as RFC 3339 strings.
#[derive(Clone)]
pub struct SharedBiodataRepository {
    connection: DbConnection,
}

impl SharedBiodataRepository {
    pub fn new(connection: DbConnection) -> Self {
        Self { connection }
    }

    fn row_to_share(row: &sqlx::sqlite::SqliteRow) -> Result<SharedBiodata> {
        let data_json: String = row.get("data");
        let customization_json: String = row.get("customization");
        let template_id: String = row.get("template_id");
        let expires_at: String = row.get("expires_at");

        Ok(SharedBiodata {
            id: row.get("id"),
            data: serde_json::from_str(&data_json).context("invalid share data blob")?,
            template_id: TemplateId::from(template_id),
            customization: serde_json::from_str(&customization_json)
                .context("invalid share customization blob")?,
            expires_at: DateTime::parse_from_rfc3339(&expires_at)
                .context("invalid share expiry timestamp")?
                .with_timezone(&Utc),
            view_count: row.get("view_count"),
        })
    }
}

#[async_trait]
impl SharedBiodataStorage for SharedBiodataRepository {
    async fn insert_share(&self, share: &SharedBiodata) -> Result<()> {
        let data_json = serde_json::to_string(&share.data)?;
        let customization_json = serde_json::to_string(&share.customization)?;

        sqlx::query(
            r#"
            INSERT INTO shared_biodata (id, data, template_id, customization, expires_at, view_count)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&share.id)
        .bind(&data_json)
        .bind(share.template_id.as_str())
        .bind(&customization_json)
        .bind(share.expires_at.to_rfc3339())
        .bind(share.view_count)
        .execute(self.connection.pool())
        .await?;

        Ok(())
    }

    async fn get_share(&self, id: &str) -> Result<Option<SharedBiodata>> {
        let row = sqlx::query("SELECT * FROM shared_biodata WHERE id = ?")
            .bind(id)
            .fetch_optional(self.connection.pool())
            .await?;

        match row {
            Some(r) => Ok(Some(Self::row_to_share(&r)?)),
            None => Ok(None),
        }
    }

    async fn set_view_count(&self, id: &str, view_count: i64) -> Result<()> {
        sqlx::query("UPDATE shared_biodata SET view_count = ? WHERE id = ?")
            .bind(view_count)
            .bind(id)
            .execute(self.connection.pool())
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use shared::{BiodataData, TemplateCustomization};

    async fn setup_test() -> SharedBiodataRepository {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        SharedBiodataRepository::new(db)
    }

    fn sample_share(id: &str) -> SharedBiodata {
        SharedBiodata {
            id: id.to_string(),
            data: BiodataData::default(),
            template_id: TemplateId::Traditional2,
            customization: TemplateCustomization::default(),
            expires_at: Utc::now() + Duration::hours(24),
            view_count: 0,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_share() {
        let repo = setup_test().await;
        let share = sample_share("share-1");

        repo.insert_share(&share).await.expect("Failed to insert share");

        let found = repo.get_share("share-1").await.expect("Query failed").expect("Share missing");
        assert_eq!(found.id, "share-1");
        assert_eq!(found.template_id, TemplateId::Traditional2);
        assert_eq!(found.view_count, 0);
        // RFC 3339 round-trip keeps sub-second precision
        assert_eq!(found.expires_at, share.expires_at);
    }

    #[tokio::test]
    async fn test_get_missing_share() {
        let repo = setup_test().await;
        let found = repo.get_share("no-such-id").await.expect("Query failed");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_set_view_count() {
        let repo = setup_test().await;
        repo.insert_share(&sample_share("share-2")).await.expect("Failed to insert share");

        repo.set_view_count("share-2", 7).await.expect("Failed to set view count");

        let found = repo.get_share("share-2").await.expect("Query failed").expect("Share missing");
        assert_eq!(found.view_count, 7);
    }

    #[tokio::test]
    async fn test_unknown_template_id_round_trips() {
        let repo = setup_test().await;
        let mut share = sample_share("share-3");
        share.template_id = TemplateId::Unknown("festive-9".to_string());

        repo.insert_share(&share).await.expect("Failed to insert share");

        let found = repo.get_share("share-3").await.expect("Query failed").expect("Share missing");
        assert_eq!(found.template_id, TemplateId::Unknown("festive-9".to_string()));
    }
}
