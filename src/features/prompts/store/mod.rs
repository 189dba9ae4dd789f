//! Persistence for `system_prompts`.
//!
//! One [`PromptStore`] implementation per SQL backend. Every operation is a
//! single statement, or a short sequence inside one transaction, so a failed
//! rename or version bump never leaves a half-applied change behind.

pub mod mysql;
pub mod postgres;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use std::sync::Arc;

use crate::core::database::DatabasePool;
use crate::core::error::Result;
use crate::features::prompts::models::{NewSystemPrompt, SystemPrompt, SystemPromptChanges};

pub use mysql::MySqlPromptStore;
pub use postgres::PgPromptStore;

#[async_trait]
pub trait PromptStore: Send + Sync {
    /// Human readable backend name (e.g. "PostgreSQL")
    fn backend_name(&self) -> &'static str;

    /// Round trip to the database
    async fn ping(&self) -> Result<()>;

    /// Number of rows in the table
    async fn count(&self) -> Result<i64>;

    /// All prompts ordered by category, then key
    async fn list(&self, active_only: bool) -> Result<Vec<SystemPrompt>>;

    async fn find_by_key(&self, key: &str) -> Result<Option<SystemPrompt>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<SystemPrompt>>;

    async fn key_exists(&self, key: &str) -> Result<bool>;

    /// Insert a new row. A duplicate key surfaces as `AppError::Conflict`.
    async fn insert(&self, prompt: &NewSystemPrompt) -> Result<SystemPrompt>;

    /// Apply `changes` to the row named `key`, bumping `version` and `updated_at`.
    ///
    /// When `changes.new_key` is set the key is changed in the same statement;
    /// a taken target key yields `AppError::Conflict` and nothing is written.
    /// Returns `None` when no row has `key`.
    async fn update(&self, key: &str, changes: &SystemPromptChanges)
        -> Result<Option<SystemPrompt>>;

    /// Delete the row named `key`; `false` when nothing matched
    async fn delete(&self, key: &str) -> Result<bool>;
}

/// Build the store matching the pool's backend
pub fn from_pool(pool: DatabasePool) -> Arc<dyn PromptStore> {
    match pool {
        DatabasePool::Postgres(pool) => Arc::new(PgPromptStore::new(pool)),
        DatabasePool::MySql(pool) => Arc::new(MySqlPromptStore::new(pool)),
    }
}

pub(crate) fn rename_conflict(new_key: &str) -> crate::core::error::AppError {
    crate::core::error::AppError::Conflict(format!(
        "Cannot rename: prompt key '{}' already exists",
        new_key
    ))
}
