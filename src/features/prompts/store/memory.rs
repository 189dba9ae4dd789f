use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::Mutex;

use crate::core::error::{AppError, Result};
use crate::features::prompts::models::{NewSystemPrompt, SystemPrompt, SystemPromptChanges};
use crate::features::prompts::store::{rename_conflict, PromptStore};

/// In-memory `PromptStore` with the same ordering and conflict rules as the SQL stores
#[derive(Debug, Default)]
pub struct MemoryPromptStore {
    state: Mutex<MemoryState>,
    unavailable: bool,
}

#[derive(Debug, Default)]
struct MemoryState {
    rows: Vec<SystemPrompt>,
    next_id: i64,
}

impl MemoryPromptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails as if the database were down
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    fn state(&self) -> Result<std::sync::MutexGuard<'_, MemoryState>> {
        if self.unavailable {
            return Err(AppError::DatabaseUnavailable(
                "connection refused".to_string(),
            ));
        }
        self.state
            .lock()
            .map_err(|_| AppError::Internal("memory store poisoned".to_string()))
    }
}

#[async_trait]
impl PromptStore for MemoryPromptStore {
    fn backend_name(&self) -> &'static str {
        "in-memory"
    }

    async fn ping(&self) -> Result<()> {
        self.state().map(|_| ())
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.state()?.rows.len() as i64)
    }

    async fn list(&self, active_only: bool) -> Result<Vec<SystemPrompt>> {
        let state = self.state()?;
        let mut prompts: Vec<SystemPrompt> = state
            .rows
            .iter()
            .filter(|p| !active_only || p.is_active)
            .cloned()
            .collect();
        prompts.sort_by(|a, b| {
            a.category
                .cmp(&b.category)
                .then_with(|| a.prompt_key.cmp(&b.prompt_key))
        });
        Ok(prompts)
    }

    async fn find_by_key(&self, key: &str) -> Result<Option<SystemPrompt>> {
        let state = self.state()?;
        Ok(state.rows.iter().find(|p| p.prompt_key == key).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<SystemPrompt>> {
        let state = self.state()?;
        Ok(state.rows.iter().find(|p| p.id == id).cloned())
    }

    async fn key_exists(&self, key: &str) -> Result<bool> {
        let state = self.state()?;
        Ok(state.rows.iter().any(|p| p.prompt_key == key))
    }

    async fn insert(&self, prompt: &NewSystemPrompt) -> Result<SystemPrompt> {
        let mut state = self.state()?;
        if state.rows.iter().any(|p| p.prompt_key == prompt.prompt_key) {
            return Err(AppError::Conflict(
                "A prompt with this key already exists. Please use a different key.".to_string(),
            ));
        }

        state.next_id += 1;
        let now = Utc::now();
        let created = SystemPrompt {
            id: state.next_id,
            prompt_key: prompt.prompt_key.clone(),
            prompt_text: prompt.prompt_text.clone(),
            description: prompt.description.clone(),
            category: prompt.category.clone(),
            is_active: true,
            version: 1,
            created_at: now,
            updated_at: now,
        };
        state.rows.push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        key: &str,
        changes: &SystemPromptChanges,
    ) -> Result<Option<SystemPrompt>> {
        let mut state = self.state()?;

        if !state.rows.iter().any(|p| p.prompt_key == key) {
            return Ok(None);
        }
        if let Some(ref new_key) = changes.new_key {
            if state.rows.iter().any(|p| &p.prompt_key == new_key) {
                return Err(rename_conflict(new_key));
            }
        }

        let Some(row) = state.rows.iter_mut().find(|p| p.prompt_key == key) else {
            return Ok(None);
        };

        if let Some(ref new_key) = changes.new_key {
            row.prompt_key = new_key.clone();
        }
        row.prompt_text = changes.prompt_text.clone();
        if let Some(ref description) = changes.description {
            row.description = description.clone();
        }
        if let Some(ref category) = changes.category {
            row.category = category.clone();
        }
        if let Some(is_active) = changes.is_active {
            row.is_active = is_active;
        }
        row.version += 1;
        // Keep updated_at strictly increasing even within one clock tick
        row.updated_at = Utc::now().max(row.updated_at + Duration::microseconds(1));

        Ok(Some(row.clone()))
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut state = self.state()?;
        let before = state.rows.len();
        state.rows.retain(|p| p.prompt_key != key);
        Ok(state.rows.len() < before)
    }
}
