use axum::{routing::get, Router};

use crate::features::health::handlers;
use crate::features::prompts::PromptState;

pub fn routes(state: PromptState) -> Router {
    Router::new()
        .route("/api/status", get(handlers::status))
        .route("/health", get(handlers::health))
        .with_state(state)
}
