use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use minijinja::context;
use thiserror::Error;

use crate::shared::types::ApiResponse;
use crate::shared::views;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Database unavailable: {0}")]
    DatabaseUnavailable(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Classify driver errors so `?` yields the right variant.
///
/// Unique violations become `Conflict`; connection level failures become
/// `DatabaseUnavailable`; everything else stays a generic database error.
impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => AppError::Conflict(
                "A prompt with this key already exists. Please use a different key.".to_string(),
            ),
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => AppError::DatabaseUnavailable(e.to_string()),
            _ => AppError::Database(e),
        }
    }
}

impl AppError {
    /// Status code, caller-facing message and field errors for this error.
    ///
    /// Server-side failures are logged here and reported with a generic message.
    fn parts(&self) -> (StatusCode, String, Option<Vec<String>>) {
        match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error occurred".to_string(),
                    None,
                )
            }
            AppError::DatabaseUnavailable(msg) => {
                tracing::error!("Database connection failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database connection failed".to_string(),
                    None,
                )
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                msg.clone(),
                Some(vec![msg.clone()]),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            // Duplicate keys are reported as a plain bad request to form posts
            AppError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = self.parts();

        let body = Json(ApiResponse::<()>::error(Some(message), errors));

        (status, body).into_response()
    }
}

/// Error returned by HTML page handlers; renders `error.html` instead of JSON
#[derive(Debug)]
pub struct PageError(pub AppError);

impl From<AppError> for PageError {
    fn from(e: AppError) -> Self {
        PageError(e)
    }
}

impl From<sqlx::Error> for PageError {
    fn from(e: sqlx::Error) -> Self {
        PageError(AppError::from(e))
    }
}

impl From<views::TemplateError> for PageError {
    fn from(e: views::TemplateError) -> Self {
        PageError(AppError::from(e))
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, message, errors) = self.0.parts();

        let rendered = views::render_page(
            "error.html",
            context! {
                status => status.as_u16(),
                reason => status.canonical_reason().unwrap_or("Error"),
                message => message,
                errors => errors.unwrap_or_default(),
            },
        );

        match rendered {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render error page: {}", e);
                (status, message).into_response()
            }
        }
    }
}

impl From<views::TemplateError> for AppError {
    fn from(e: views::TemplateError) -> Self {
        AppError::Internal(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_maps_to_bad_request() {
        let (status, message, _) = AppError::Conflict("taken".to_string()).parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "taken");
    }

    #[test]
    fn test_server_errors_hide_details() {
        let (status, message, _) =
            AppError::DatabaseUnavailable("connection refused (os error 111)".to_string()).parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!message.contains("os error"));

        let (status, message, _) = AppError::from(sqlx::Error::RowNotFound).parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "Database error occurred");
    }

    #[test]
    fn test_pool_timeout_is_unavailable() {
        assert!(matches!(
            AppError::from(sqlx::Error::PoolTimedOut),
            AppError::DatabaseUnavailable(_)
        ));
    }

    #[test]
    fn test_page_error_renders_html() {
        let response = PageError(AppError::NotFound("Prompt 'missing' not found".to_string()))
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let content_type = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("text/html"));
    }
}
