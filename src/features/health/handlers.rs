use axum::{extract::State, http::StatusCode, Json};

use crate::features::health::dtos::StatusDto;
use crate::features::prompts::PromptState;

fn status_body(state: &PromptState, status: &str) -> StatusDto {
    StatusDto {
        status: status.to_string(),
        service: state.info.name.clone(),
        version: state.info.version.clone(),
        database: state.service.database_name().to_string(),
    }
}

/// Service identity, no database round trip
#[utoipa::path(
    get,
    path = "/api/status",
    responses(
        (status = 200, description = "Service is running", body = StatusDto)
    ),
    tag = "health"
)]
pub async fn status(State(state): State<PromptState>) -> Json<StatusDto> {
    Json(status_body(&state, "running"))
}

/// Liveness check that also pings the database
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service and database are reachable", body = StatusDto),
        (status = 503, description = "Database unreachable", body = StatusDto)
    ),
    tag = "health"
)]
pub async fn health(State(state): State<PromptState>) -> (StatusCode, Json<StatusDto>) {
    match state.service.check_database().await {
        Ok(()) => (StatusCode::OK, Json(status_body(&state, "healthy"))),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(status_body(&state, "unhealthy")),
            )
        }
    }
}
