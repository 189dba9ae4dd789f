use utoipa::{Modify, OpenApi};

use crate::features::health::{dtos as health_dtos, handlers as health_handlers};
use crate::features::prompts::{dtos as prompts_dtos, handlers as prompts_handlers};
use crate::shared::types::StatusMessage;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Prompts
        prompts_handlers::list_prompts,
        prompts_handlers::get_prompt,
        // Health
        health_handlers::status,
        health_handlers::health,
    ),
    components(
        schemas(
            StatusMessage,
            prompts_dtos::PromptPayloadDto,
            prompts_dtos::PromptListDto,
            health_dtos::StatusDto,
        )
    ),
    tags(
        (name = "prompts", description = "Read-only access to active system prompts"),
        (name = "health", description = "Service status and database liveness"),
    ),
    info(
        title = "SystemPrompt Management API",
        version = "2.0.0",
        description = "JSON endpoints of the system prompt admin service",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documents_json_endpoints() {
        let doc = ApiDoc::openapi();
        for path in ["/api/prompts", "/api/prompts/{key}", "/api/status", "/health"] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_info_modifier_overrides_defaults() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Prompts".to_string(),
            version: "9.9.9".to_string(),
            description: "test".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Prompts");
        assert_eq!(doc.info.version, "9.9.9");
        assert_eq!(doc.info.description.as_deref(), Some("test"));
    }
}
