use async_trait::async_trait;
use sqlx::{MySql, MySqlPool, Transaction};

use crate::core::config::DatabaseBackend;
use crate::core::error::{AppError, Result};
use crate::features::prompts::models::{NewSystemPrompt, SystemPrompt, SystemPromptChanges};
use crate::features::prompts::store::{rename_conflict, PromptStore};

/// `PromptStore` over a MySQL / MariaDB pool.
///
/// MySQL has no `RETURNING`, so writes re-select the row inside the same transaction.
pub struct MySqlPromptStore {
    pool: MySqlPool,
}

impl std::fmt::Debug for MySqlPromptStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlPromptStore")
            .field("pool", &"<MySqlPool>")
            .finish()
    }
}

impl MySqlPromptStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn fetch_by_id(
        tx: &mut Transaction<'_, MySql>,
        id: i64,
    ) -> Result<Option<SystemPrompt>> {
        let prompt = sqlx::query_as::<_, SystemPrompt>(
            r#"
            SELECT id, prompt_key, prompt_text, description, category,
                   is_active, version, created_at, updated_at
            FROM system_prompts
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(prompt)
    }
}

#[async_trait]
impl PromptStore for MySqlPromptStore {
    fn backend_name(&self) -> &'static str {
        DatabaseBackend::MySql.name()
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn count(&self) -> Result<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM system_prompts")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn list(&self, active_only: bool) -> Result<Vec<SystemPrompt>> {
        let prompts = sqlx::query_as::<_, SystemPrompt>(
            r#"
            SELECT id, prompt_key, prompt_text, description, category,
                   is_active, version, created_at, updated_at
            FROM system_prompts
            WHERE (? = FALSE OR is_active = TRUE)
            ORDER BY category, prompt_key
            "#,
        )
        .bind(active_only)
        .fetch_all(&self.pool)
        .await?;

        Ok(prompts)
    }

    async fn find_by_key(&self, key: &str) -> Result<Option<SystemPrompt>> {
        let prompt = sqlx::query_as::<_, SystemPrompt>(
            r#"
            SELECT id, prompt_key, prompt_text, description, category,
                   is_active, version, created_at, updated_at
            FROM system_prompts
            WHERE prompt_key = ?
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(prompt)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<SystemPrompt>> {
        let prompt = sqlx::query_as::<_, SystemPrompt>(
            r#"
            SELECT id, prompt_key, prompt_text, description, category,
                   is_active, version, created_at, updated_at
            FROM system_prompts
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(prompt)
    }

    async fn key_exists(&self, key: &str) -> Result<bool> {
        let matches: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM system_prompts WHERE prompt_key = ?")
                .bind(key)
                .fetch_one(&self.pool)
                .await?;
        Ok(matches > 0)
    }

    async fn insert(&self, prompt: &NewSystemPrompt) -> Result<SystemPrompt> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO system_prompts (prompt_key, prompt_text, description, category)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&prompt.prompt_key)
        .bind(&prompt.prompt_text)
        .bind(&prompt.description)
        .bind(&prompt.category)
        .execute(&mut *tx)
        .await?;

        let id = i64::try_from(result.last_insert_id())
            .map_err(|_| AppError::Internal("Inserted id out of range".to_string()))?;
        let created = Self::fetch_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Inserted prompt {} vanished", id)))?;

        tx.commit().await?;
        Ok(created)
    }

    async fn update(
        &self,
        key: &str,
        changes: &SystemPromptChanges,
    ) -> Result<Option<SystemPrompt>> {
        let mut tx = self.pool.begin().await?;

        let id: Option<i64> =
            sqlx::query_scalar("SELECT id FROM system_prompts WHERE prompt_key = ? FOR UPDATE")
                .bind(key)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(id) = id else {
            return Ok(None);
        };

        if let Some(ref new_key) = changes.new_key {
            let taken: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM system_prompts WHERE prompt_key = ?")
                    .bind(new_key)
                    .fetch_one(&mut *tx)
                    .await?;
            if taken > 0 {
                return Err(rename_conflict(new_key));
            }
        }

        sqlx::query(
            r#"
            UPDATE system_prompts
            SET prompt_key = COALESCE(?, prompt_key),
                prompt_text = ?,
                description = COALESCE(?, description),
                category = COALESCE(?, category),
                is_active = COALESCE(?, is_active),
                version = version + 1,
                updated_at = CURRENT_TIMESTAMP(6)
            WHERE id = ?
            "#,
        )
        .bind(changes.new_key.as_deref())
        .bind(&changes.prompt_text)
        .bind(changes.description.as_deref())
        .bind(changes.category.as_deref())
        .bind(changes.is_active)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let updated = Self::fetch_by_id(&mut tx, id).await?;

        tx.commit().await?;
        Ok(updated)
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM system_prompts WHERE prompt_key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
