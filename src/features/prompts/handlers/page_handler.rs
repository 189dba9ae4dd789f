use axum::{
    extract::State,
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use minijinja::context;
use validator::Validate;

use crate::core::error::{AppError, PageError};
use crate::core::extractor::{AppForm, AppPath};
use crate::core::middleware::wants_json;
use crate::features::prompts::dtos::{
    CreatePromptDto, PromptEditView, PromptRowView, UpdatePromptDto,
};
use crate::features::prompts::models::DEFAULT_CATEGORY;
use crate::features::prompts::state::PromptState;
use crate::shared::types::StatusMessage;
use crate::shared::views::render_page;

type PageResult<T> = std::result::Result<T, PageError>;

/// List page
pub async fn index(State(state): State<PromptState>) -> PageResult<Html<String>> {
    let prompts = state.service.list().await?;
    let rows: Vec<PromptRowView> = prompts.iter().map(PromptRowView::from).collect();

    let html = render_page(
        "index.html",
        context! {
            service => state.info.as_ref(),
            database => state.service.database_name(),
            count => rows.len(),
            prompts => rows,
        },
    )?;
    Ok(Html(html))
}

/// Create form
pub async fn new_prompt(State(state): State<PromptState>) -> PageResult<Html<String>> {
    let html = render_page(
        "new.html",
        context! {
            service => state.info.as_ref(),
            database => state.service.database_name(),
            default_category => DEFAULT_CATEGORY,
        },
    )?;
    Ok(Html(html))
}

/// Edit form, looked up by key
pub async fn edit_by_key(
    State(state): State<PromptState>,
    AppPath(key): AppPath<String>,
) -> PageResult<Html<String>> {
    let prompt = state.service.get_by_key(&key).await?;
    render_edit(&state, PromptEditView::from(prompt))
}

/// Edit form, looked up by id
pub async fn edit_by_id(
    State(state): State<PromptState>,
    AppPath(id): AppPath<i64>,
) -> PageResult<Html<String>> {
    let prompt = state.service.get_by_id(id).await?;
    render_edit(&state, PromptEditView::from(prompt))
}

fn render_edit(state: &PromptState, prompt: PromptEditView) -> PageResult<Html<String>> {
    let html = render_page(
        "edit.html",
        context! {
            service => state.info.as_ref(),
            database => state.service.database_name(),
            prompt => prompt,
        },
    )?;
    Ok(Html(html))
}

pub async fn create(
    State(state): State<PromptState>,
    AppForm(dto): AppForm<CreatePromptDto>,
) -> PageResult<Redirect> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    state.service.create(dto).await?;
    Ok(Redirect::to("/"))
}

pub async fn update(
    State(state): State<PromptState>,
    AppPath(key): AppPath<String>,
    AppForm(dto): AppForm<UpdatePromptDto>,
) -> PageResult<Redirect> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    state.service.update(&key, dto).await?;
    Ok(Redirect::to("/"))
}

/// Delete via plain link
pub async fn delete_get(
    State(state): State<PromptState>,
    AppPath(key): AppPath<String>,
) -> PageResult<Redirect> {
    state.service.delete(&key).await?;
    Ok(Redirect::to("/"))
}

/// Delete via form post; script clients asking for JSON get `{"status": "success"}`
pub async fn delete_post(
    State(state): State<PromptState>,
    AppPath(key): AppPath<String>,
    headers: HeaderMap,
) -> Response {
    let json = wants_json(&headers);
    match state.service.delete(&key).await {
        Ok(()) if json => Json(StatusMessage::success()).into_response(),
        Ok(()) => Redirect::to("/").into_response(),
        Err(e) if json => e.into_response(),
        Err(e) => PageError(e).into_response(),
    }
}
