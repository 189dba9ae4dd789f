use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::config::DatabaseBackend;
use crate::core::error::Result;
use crate::features::prompts::models::{NewSystemPrompt, SystemPrompt, SystemPromptChanges};
use crate::features::prompts::store::{rename_conflict, PromptStore};

/// `PromptStore` over a PostgreSQL pool
pub struct PgPromptStore {
    pool: PgPool,
}

impl std::fmt::Debug for PgPromptStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgPromptStore")
            .field("pool", &"<PgPool>")
            .finish()
    }
}

impl PgPromptStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PromptStore for PgPromptStore {
    fn backend_name(&self) -> &'static str {
        DatabaseBackend::Postgres.name()
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
            WHERE ($1 = FALSE OR is_active = TRUE)
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
            WHERE prompt_key = $1
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
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(prompt)
    }

    async fn key_exists(&self, key: &str) -> Result<bool> {
        let matches: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM system_prompts WHERE prompt_key = $1")
                .bind(key)
                .fetch_one(&self.pool)
                .await?;
        Ok(matches > 0)
    }

    async fn insert(&self, prompt: &NewSystemPrompt) -> Result<SystemPrompt> {
        let created = sqlx::query_as::<_, SystemPrompt>(
            r#"
            INSERT INTO system_prompts (prompt_key, prompt_text, description, category)
            VALUES ($1, $2, $3, $4)
            RETURNING id, prompt_key, prompt_text, description, category,
                      is_active, version, created_at, updated_at
            "#,
        )
        .bind(&prompt.prompt_key)
        .bind(&prompt.prompt_text)
        .bind(&prompt.description)
        .bind(&prompt.category)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update(
        &self,
        key: &str,
        changes: &SystemPromptChanges,
    ) -> Result<Option<SystemPrompt>> {
        let mut tx = self.pool.begin().await?;

        let current: Option<i64> =
            sqlx::query_scalar("SELECT id FROM system_prompts WHERE prompt_key = $1 FOR UPDATE")
                .bind(key)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(id) = current else {
            return Ok(None);
        };

        if let Some(ref new_key) = changes.new_key {
            let taken: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM system_prompts WHERE prompt_key = $1")
                    .bind(new_key)
                    .fetch_one(&mut *tx)
                    .await?;
            if taken > 0 {
                return Err(rename_conflict(new_key));
            }
        }

        let updated = sqlx::query_as::<_, SystemPrompt>(
            r#"
            UPDATE system_prompts
            SET prompt_key = COALESCE($1, prompt_key),
                prompt_text = $2,
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                is_active = COALESCE($5, is_active),
                version = version + 1,
                updated_at = NOW()
            WHERE id = $6
            RETURNING id, prompt_key, prompt_text, description, category,
                      is_active, version, created_at, updated_at
            "#,
        )
        .bind(changes.new_key.as_deref())
        .bind(&changes.prompt_text)
        .bind(changes.description.as_deref())
        .bind(changes.category.as_deref())
        .bind(changes.is_active)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM system_prompts WHERE prompt_key = $1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;

    fn new_prompt(key: &str, text: &str) -> NewSystemPrompt {
        NewSystemPrompt {
            prompt_key: key.to_string(),
            prompt_text: text.to_string(),
            description: String::new(),
            category: "general".to_string(),
        }
    }

    #[sqlx::test(migrations = "./migrations/postgres")]
    #[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
    async fn test_insert_and_find(pool: PgPool) {
        let store = PgPromptStore::new(pool);

        let created = store
            .insert(&new_prompt("greeting", "Hello, customer."))
            .await
            .unwrap();
        assert_eq!(created.version, 1);
        assert!(created.is_active);

        let found = store.find_by_key("greeting").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.prompt_text, "Hello, customer.");
        assert!(store.key_exists("greeting").await.unwrap());
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[sqlx::test(migrations = "./migrations/postgres")]
    #[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
    async fn test_duplicate_insert_is_conflict(pool: PgPool) {
        let store = PgPromptStore::new(pool);
        store.insert(&new_prompt("greeting", "one")).await.unwrap();

        let err = store
            .insert(&new_prompt("greeting", "two"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[sqlx::test(migrations = "./migrations/postgres")]
    #[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
    async fn test_update_bumps_version_and_renames(pool: PgPool) {
        let store = PgPromptStore::new(pool);
        let created = store
            .insert(&new_prompt("greeting", "Hello, customer."))
            .await
            .unwrap();

        let changes = SystemPromptChanges {
            prompt_text: "Hi there.".to_string(),
            new_key: Some("welcome".to_string()),
            ..Default::default()
        };
        let updated = store.update("greeting", &changes).await.unwrap().unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.prompt_key, "welcome");
        assert_eq!(updated.version, 2);
        assert_eq!(updated.created_at, created.created_at);
        assert!(store.find_by_key("greeting").await.unwrap().is_none());
    }

    #[sqlx::test(migrations = "./migrations/postgres")]
    #[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
    async fn test_rename_onto_taken_key_changes_nothing(pool: PgPool) {
        let store = PgPromptStore::new(pool);
        store.insert(&new_prompt("greeting", "one")).await.unwrap();
        store.insert(&new_prompt("farewell", "two")).await.unwrap();

        let changes = SystemPromptChanges {
            prompt_text: "changed".to_string(),
            new_key: Some("farewell".to_string()),
            ..Default::default()
        };
        let err = store.update("greeting", &changes).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let original = store.find_by_key("greeting").await.unwrap().unwrap();
        assert_eq!(original.prompt_text, "one");
        assert_eq!(original.version, 1);
    }

    #[sqlx::test(migrations = "./migrations/postgres")]
    #[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
    async fn test_delete_reports_missing_rows(pool: PgPool) {
        let store = PgPromptStore::new(pool);
        store.insert(&new_prompt("greeting", "one")).await.unwrap();

        assert!(store.delete("greeting").await.unwrap());
        assert!(!store.delete("greeting").await.unwrap());
        assert!(store.find_by_key("greeting").await.unwrap().is_none());
    }

    #[sqlx::test(migrations = "./migrations/postgres")]
    #[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
    async fn test_large_prompt_text_round_trips(pool: PgPool) {
        let store = PgPromptStore::new(pool);
        let text = "x".repeat(200 * 1024);

        store.insert(&new_prompt("large", &text)).await.unwrap();
        let found = store.find_by_key("large").await.unwrap().unwrap();
        assert_eq!(found.prompt_text.len(), text.len());
    }
}
