use axum::{
    routing::{get, post},
    Router,
};

use crate::features::prompts::{handlers, state::PromptState};

/// HTML admin pages and form endpoints
pub fn page_routes(state: PromptState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/new", get(handlers::new_prompt))
        .route("/edit/{key}", get(handlers::edit_by_key))
        .route("/prompt/{id}", get(handlers::edit_by_id))
        .route("/create", post(handlers::create))
        .route("/update/{key}", post(handlers::update))
        .route(
            "/delete/{key}",
            get(handlers::delete_get).post(handlers::delete_post),
        )
        .with_state(state)
}

/// Read-only JSON API; inactive prompts are not served
pub fn api_routes(state: PromptState) -> Router {
    Router::new()
        .route("/api/prompts", get(handlers::list_prompts))
        .route("/api/prompts/{key}", get(handlers::get_prompt))
        .route("/api/prompt/{key}", get(handlers::get_prompt))
        .route("/api/system-prompts/{key}", get(handlers::get_prompt))
        .with_state(state)
}
