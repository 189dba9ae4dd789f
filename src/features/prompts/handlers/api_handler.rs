use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::error::Result;
use crate::features::prompts::dtos::{PromptListDto, PromptPayloadDto};
use crate::features::prompts::state::PromptState;

/// Get an active prompt by key
#[utoipa::path(
    get,
    path = "/api/prompts/{key}",
    params(
        ("key" = String, Path, description = "Prompt key")
    ),
    responses(
        (status = 200, description = "Prompt retrieved successfully", body = PromptPayloadDto),
        (status = 404, description = "Prompt not found or inactive")
    ),
    tag = "prompts"
)]
pub async fn get_prompt(
    State(state): State<PromptState>,
    Path(key): Path<String>,
) -> Result<Json<PromptPayloadDto>> {
    let prompt = state.service.get_active_by_key(&key).await?;
    Ok(Json(PromptPayloadDto::from(prompt)))
}

/// List active prompts, ordered by category then key
#[utoipa::path(
    get,
    path = "/api/prompts",
    responses(
        (status = 200, description = "Prompts retrieved successfully", body = PromptListDto)
    ),
    tag = "prompts"
)]
pub async fn list_prompts(State(state): State<PromptState>) -> Result<Json<PromptListDto>> {
    let prompts = state.service.list_active().await?;
    Ok(Json(PromptListDto {
        prompts: prompts.into_iter().map(PromptPayloadDto::from).collect(),
    }))
}
