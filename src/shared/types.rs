use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Envelope used for JSON error bodies
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub errors: Option<Vec<String>>,
}

impl<T> ApiResponse<T> {
    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            errors,
        }
    }
}

/// Plain `{"status": "..."}` acknowledgement
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusMessage {
    pub status: String,
}

impl StatusMessage {
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
        }
    }
}
