use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::prompts::models::SystemPrompt;
use crate::shared::validation::{parse_flag, validate_not_blank, PROMPT_KEY_REGEX};

/// Characters of prompt text shown in the list page
const PREVIEW_CHARS: usize = 100;

/// Timestamp format used on the admin pages
const DISPLAY_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

// Form helpers: browsers send empty inputs as "", which means "not provided" here

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

fn optional_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_flag(raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid is_active value: {}", raw))),
    }
}

// Create request (form: /create)
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreatePromptDto {
    #[validate(
        length(min = 1, max = 100),
        regex(
            path = *PROMPT_KEY_REGEX,
            message = "key may only contain letters, digits, '_', '-' and '.', and must start with a letter or digit"
        )
    )]
    pub prompt_key: String,

    #[validate(custom(function = "validate_not_blank"))]
    pub prompt_text: String,

    #[serde(default)]
    #[validate(length(max = 500))]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(length(max = 100))]
    pub category: Option<String>,
}

// Update request (form: /update/{key})
#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct UpdatePromptDto {
    #[validate(custom(function = "validate_not_blank"))]
    pub prompt_text: String,

    /// New key; differs from the path key when renaming
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(
        length(min = 1, max = 100),
        regex(
            path = *PROMPT_KEY_REGEX,
            message = "key may only contain letters, digits, '_', '-' and '.', and must start with a letter or digit"
        )
    )]
    pub prompt_key: Option<String>,

    /// An empty string clears the description; absent keeps it
    #[serde(default)]
    #[validate(length(max = 500))]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(length(max = 100))]
    pub category: Option<String>,

    #[serde(default, deserialize_with = "optional_flag")]
    pub is_active: Option<bool>,
}

/// JSON payload for one prompt
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PromptPayloadDto {
    pub prompt_key: String,
    pub prompt_text: String,
    pub description: String,
    pub category: String,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SystemPrompt> for PromptPayloadDto {
    fn from(p: SystemPrompt) -> Self {
        Self {
            prompt_key: p.prompt_key,
            prompt_text: p.prompt_text,
            description: p.description,
            category: p.category,
            version: p.version,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// JSON payload for the active prompt list
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PromptListDto {
    pub prompts: Vec<PromptPayloadDto>,
}

/// One row of the list page
#[derive(Debug, Serialize)]
pub struct PromptRowView {
    pub prompt_key: String,
    pub category: String,
    pub description: String,
    pub preview: String,
    pub text_length: usize,
    pub is_active: bool,
    pub version: i32,
    pub updated: String,
}

impl From<&SystemPrompt> for PromptRowView {
    fn from(p: &SystemPrompt) -> Self {
        Self {
            prompt_key: p.prompt_key.clone(),
            category: p.category.clone(),
            description: p.description.clone(),
            preview: preview(&p.prompt_text),
            text_length: p.prompt_text.chars().count(),
            is_active: p.is_active,
            version: p.version,
            updated: p.updated_at.format(DISPLAY_DATETIME_FORMAT).to_string(),
        }
    }
}

/// The edit page model
#[derive(Debug, Serialize)]
pub struct PromptEditView {
    pub id: i64,
    pub prompt_key: String,
    pub prompt_text: String,
    pub description: String,
    pub category: String,
    pub is_active: bool,
    pub version: i32,
    pub created: String,
    pub updated: String,
}

impl From<SystemPrompt> for PromptEditView {
    fn from(p: SystemPrompt) -> Self {
        Self {
            id: p.id,
            created: p.created_at.format(DISPLAY_DATETIME_FORMAT).to_string(),
            updated: p.updated_at.format(DISPLAY_DATETIME_FORMAT).to_string(),
            prompt_key: p.prompt_key,
            prompt_text: p.prompt_text,
            description: p.description,
            category: p.category,
            is_active: p.is_active,
            version: p.version,
        }
    }
}

/// First `PREVIEW_CHARS` characters, with `...` appended when truncated
fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(text: &str) -> SystemPrompt {
        let at = Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap();
        SystemPrompt {
            id: 7,
            prompt_key: "greeting".to_string(),
            prompt_text: text.to_string(),
            description: String::new(),
            category: "general".to_string(),
            is_active: true,
            version: 1,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_preview_truncates_long_text() {
        let long = "a".repeat(150);
        let row = PromptRowView::from(&sample(&long));
        assert_eq!(row.preview.len(), 103);
        assert!(row.preview.ends_with("..."));
        assert_eq!(row.text_length, 150);
    }

    #[test]
    fn test_preview_keeps_short_text() {
        let row = PromptRowView::from(&sample("Hello, customer."));
        assert_eq!(row.preview, "Hello, customer.");
        assert_eq!(row.updated, "2025-03-14 09:26");
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        let text = "あ".repeat(120);
        let row = PromptRowView::from(&sample(&text));
        assert_eq!(row.preview.chars().count(), 103);
        assert_eq!(row.text_length, 120);
    }

    #[test]
    fn test_create_dto_validation() {
        let dto = CreatePromptDto {
            prompt_key: "greeting".to_string(),
            prompt_text: "Hello, customer.".to_string(),
            description: None,
            category: None,
        };
        assert!(dto.validate().is_ok());

        let bad_key = CreatePromptDto {
            prompt_key: "has space".to_string(),
            ..dto
        };
        assert!(bad_key.validate().is_err());

        let blank_text = CreatePromptDto {
            prompt_key: "greeting".to_string(),
            prompt_text: "   ".to_string(),
            description: None,
            category: None,
        };
        assert!(blank_text.validate().is_err());

        let long_key = CreatePromptDto {
            prompt_key: "k".repeat(101),
            prompt_text: "text".to_string(),
            description: None,
            category: None,
        };
        assert!(long_key.validate().is_err());
    }

    #[test]
    fn test_update_dto_from_form() {
        let dto: UpdatePromptDto = serde_json::from_value(serde_json::json!({
            "prompt_text": "Hi there.",
            "prompt_key": "",
            "description": "",
            "category": "",
            "is_active": "false",
        }))
        .unwrap();

        assert_eq!(dto.prompt_key, None);
        assert_eq!(dto.description.as_deref(), Some(""));
        assert_eq!(dto.category, None);
        assert_eq!(dto.is_active, Some(false));
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_update_dto_defaults() {
        let dto: UpdatePromptDto =
            serde_json::from_value(serde_json::json!({ "prompt_text": "Hi there." })).unwrap();

        assert_eq!(dto.prompt_key, None);
        assert_eq!(dto.description, None);
        assert_eq!(dto.is_active, None);
    }

    #[test]
    fn test_update_dto_rejects_bad_flag() {
        let result: Result<UpdatePromptDto, _> = serde_json::from_value(serde_json::json!({
            "prompt_text": "Hi there.",
            "is_active": "sometimes",
        }));
        assert!(result.is_err());
    }
}
