use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::{SavedTemplate, TemplateId};
use sqlx::Row;

use crate::storage::sqlite::DbConnection;
use crate::storage::traits::SavedTemplateStorage;

/// Saved-template rows in the `saved_templates` table. Every query filters
/// by `user_session_id` so one session never sees another's rows.
#[derive(Clone)]
pub struct SavedTemplateRepository {
    connection: DbConnection,
}

impl SavedTemplateRepository {
    pub fn new(connection: DbConnection) -> Self {
        Self { connection }
    }

    fn row_to_template(row: &sqlx::sqlite::SqliteRow) -> Result<SavedTemplate> {
        let data_json: String = row.get("biodata_data");
        let customization_json: String = row.get("customization");
        let template_id: String = row.get("template_id");
        let created_at: String = row.get("created_at");
        let updated_at: String = row.get("updated_at");
        let is_favorite: i64 = row.get("is_favorite");

        Ok(SavedTemplate {
            id: row.get("id"),
            user_session_id: row.get("user_session_id"),
            template_name: row.get("template_name"),
            biodata_data: serde_json::from_str(&data_json).context("invalid template data blob")?,
            template_id: TemplateId::from(template_id),
            customization: serde_json::from_str(&customization_json)
                .context("invalid template customization blob")?,
            created_at: DateTime::parse_from_rfc3339(&created_at)
                .context("invalid created_at timestamp")?
                .with_timezone(&Utc),
            updated_at: DateTime::parse_from_rfc3339(&updated_at)
                .context("invalid updated_at timestamp")?
                .with_timezone(&Utc),
            is_favorite: is_favorite != 0,
        })
    }
}

#[async_trait]
impl SavedTemplateStorage for SavedTemplateRepository {
    async fn insert_template(&self, template: &SavedTemplate) -> Result<()> {
        let data_json = serde_json::to_string(&template.biodata_data)?;
        let customization_json = serde_json::to_string(&template.customization)?;

        sqlx::query(
            r#"
            INSERT INTO saved_templates
                (id, user_session_id, template_name, biodata_data, template_id,
                 customization, created_at, updated_at, is_favorite)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&template.id)
        .bind(&template.user_session_id)
        .bind(&template.template_name)
        .bind(&data_json)
        .bind(template.template_id.as_str())
        .bind(&customization_json)
        .bind(template.created_at.to_rfc3339())
        .bind(template.updated_at.to_rfc3339())
        .bind(template.is_favorite as i64)
        .execute(self.connection.pool())
        .await?;

        Ok(())
    }

    async fn get_template(&self, id: &str, session_id: &str) -> Result<Option<SavedTemplate>> {
        let row = sqlx::query("SELECT * FROM saved_templates WHERE id = ? AND user_session_id = ?")
            .bind(id)
            .bind(session_id)
            .fetch_optional(self.connection.pool())
            .await?;

        match row {
            Some(r) => Ok(Some(Self::row_to_template(&r)?)),
            None => Ok(None),
        }
    }

    async fn list_templates(&self, session_id: &str) -> Result<Vec<SavedTemplate>> {
        let rows = sqlx::query(
            "SELECT * FROM saved_templates WHERE user_session_id = ? ORDER BY created_at DESC",
        )
        .bind(session_id)
        .fetch_all(self.connection.pool())
        .await?;

        rows.iter().map(Self::row_to_template).collect()
    }

    async fn update_template(
        &self,
        id: &str,
        session_id: &str,
        template_name: Option<&str>,
        is_favorite: Option<bool>,
        updated_at: DateTime<Utc>,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE saved_templates
            SET template_name = COALESCE(?, template_name),
                is_favorite = COALESCE(?, is_favorite),
                updated_at = ?
            WHERE id = ? AND user_session_id = ?
            "#,
        )
        .bind(template_name)
        .bind(is_favorite.map(|f| f as i64))
        .bind(updated_at.to_rfc3339())
        .bind(id)
        .bind(session_id)
        .execute(self.connection.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_template(&self, id: &str, session_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM saved_templates WHERE id = ? AND user_session_id = ?")
            .bind(id)
            .bind(session_id)
            .execute(self.connection.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
