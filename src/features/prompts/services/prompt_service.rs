use crate::core::error::{AppError, Result};
use crate::features::prompts::dtos::{CreatePromptDto, UpdatePromptDto};
use crate::features::prompts::models::{
    NewSystemPrompt, SystemPrompt, SystemPromptChanges, DEFAULT_CATEGORY,
};
use crate::features::prompts::seed::DEFAULT_PROMPTS;
use crate::features::prompts::store::PromptStore;
use std::sync::Arc;

fn not_found_by_key(key: &str) -> AppError {
    AppError::NotFound(format!("Prompt '{}' not found", key))
}

/// Empty or missing category falls back to the default
fn normalize_category(category: Option<String>) -> String {
    category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string())
}

pub struct PromptService {
    store: Arc<dyn PromptStore>,
}

impl std::fmt::Debug for PromptService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptService")
            .field("store", &self.store.backend_name())
            .finish()
    }
}

impl PromptService {
    pub fn new(store: Arc<dyn PromptStore>) -> Self {
        Self { store }
    }

    /// Name of the backing database, e.g. "PostgreSQL"
    pub fn database_name(&self) -> &'static str {
        self.store.backend_name()
    }

    /// Verify the database answers
    pub async fn check_database(&self) -> Result<()> {
        self.store.ping().await
    }

    /// All prompts, ordered by category then key
    pub async fn list(&self) -> Result<Vec<SystemPrompt>> {
        self.store.list(false).await.map_err(|e| {
            tracing::error!("Failed to list prompts: {}", e);
            e
        })
    }

    /// Active prompts only, same ordering as `list`
    pub async fn list_active(&self) -> Result<Vec<SystemPrompt>> {
        self.store.list(true).await.map_err(|e| {
            tracing::error!("Failed to list active prompts: {}", e);
            e
        })
    }

    /// Get prompt by key, regardless of its active flag
    pub async fn get_by_key(&self, key: &str) -> Result<SystemPrompt> {
        self.store.find_by_key(key).await?.ok_or_else(|| {
            tracing::debug!("Prompt lookup missed: key={}", key);
            not_found_by_key(key)
        })
    }

    /// Get prompt by key for API consumers; inactive prompts are hidden
    pub async fn get_active_by_key(&self, key: &str) -> Result<SystemPrompt> {
        self.store
            .find_by_key(key)
            .await?
            .filter(|p| p.is_active)
            .ok_or_else(|| not_found_by_key(key))
    }

    /// Get prompt by surrogate id
    pub async fn get_by_id(&self, id: i64) -> Result<SystemPrompt> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Prompt with id {} not found", id)))
    }

    /// Create a new prompt; an existing key is a conflict, never an overwrite
    pub async fn create(&self, dto: CreatePromptDto) -> Result<SystemPrompt> {
        if self.store.key_exists(&dto.prompt_key).await? {
            return Err(AppError::Conflict(format!(
                "Prompt key '{}' already exists",
                dto.prompt_key
            )));
        }

        let new_prompt = NewSystemPrompt {
            prompt_key: dto.prompt_key,
            prompt_text: dto.prompt_text,
            description: dto.description.unwrap_or_default(),
            category: normalize_category(dto.category),
        };

        let prompt = self.store.insert(&new_prompt).await.map_err(|e| {
            tracing::warn!("Failed to create prompt {}: {}", new_prompt.prompt_key, e);
            e
        })?;

        tracing::info!(
            "Prompt created: id={}, key={}, category={}",
            prompt.id,
            prompt.prompt_key,
            prompt.category
        );
        Ok(prompt)
    }

    /// Update prompt (increments version); renames when the form carries a different key
    pub async fn update(&self, key: &str, dto: UpdatePromptDto) -> Result<SystemPrompt> {
        let new_key = dto.prompt_key.filter(|k| k != key);

        let changes = SystemPromptChanges {
            prompt_text: dto.prompt_text,
            new_key,
            description: dto.description,
            category: dto.category.map(|c| normalize_category(Some(c))),
            is_active: dto.is_active,
        };

        let prompt = self
            .store
            .update(key, &changes)
            .await
            .map_err(|e| {
                tracing::warn!("Failed to update prompt {}: {}", key, e);
                e
            })?
            .ok_or_else(|| not_found_by_key(key))?;

        if changes.new_key.is_some() {
            tracing::info!(
                "Prompt renamed: id={}, {} -> {}, version={}",
                prompt.id,
                key,
                prompt.prompt_key,
                prompt.version
            );
        } else {
            tracing::info!(
                "Prompt updated: id={}, key={}, version={}",
                prompt.id,
                prompt.prompt_key,
                prompt.version
            );
        }
        Ok(prompt)
    }

    /// Delete prompt by key
    pub async fn delete(&self, key: &str) -> Result<()> {
        if !self.store.delete(key).await? {
            return Err(not_found_by_key(key));
        }

        tracing::info!("Prompt deleted: key={}", key);
        Ok(())
    }

    /// Insert the starter prompts if the table is empty. Returns how many were added.
    pub async fn seed_defaults(&self) -> Result<usize> {
        if self.store.count().await? > 0 {
            tracing::debug!("Skipping prompt seeding, table is not empty");
            return Ok(0);
        }

        let mut inserted = 0;
        for seed in DEFAULT_PROMPTS {
            let new_prompt = NewSystemPrompt {
                prompt_key: seed.key.to_string(),
                prompt_text: seed.text.to_string(),
                description: seed.description.to_string(),
                category: DEFAULT_CATEGORY.to_string(),
            };
            match self.store.insert(&new_prompt).await {
                Ok(_) => inserted += 1,
                // Another instance seeded the same key first
                Err(AppError::Conflict(_)) => {}
                Err(e) => return Err(e),
            }
        }

        tracing::info!("Seeded {} default prompts", inserted);
        Ok(inserted)
    }
}
