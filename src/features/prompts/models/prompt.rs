use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Category assigned when none is given
pub const DEFAULT_CATEGORY: &str = "general";

/// Database model for a row of `system_prompts`
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct SystemPrompt {
    pub id: i64,
    pub prompt_key: String,
    pub prompt_text: String,
    pub description: String,
    pub category: String,
    pub is_active: bool,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Values for a new row; the store assigns id, version and timestamps
#[derive(Debug, Clone)]
pub struct NewSystemPrompt {
    pub prompt_key: String,
    pub prompt_text: String,
    pub description: String,
    pub category: String,
}

/// Changes applied by an update. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct SystemPromptChanges {
    pub prompt_text: String,
    /// Rename target; only set when it differs from the current key
    pub new_key: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub is_active: Option<bool>,
}
