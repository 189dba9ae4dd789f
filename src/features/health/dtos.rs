use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `/api/status` and `/health`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusDto {
    /// `running`, `healthy` or `unhealthy`
    pub status: String,
    pub service: String,
    pub version: String,
    /// Backend name, e.g. "PostgreSQL"
    pub database: String,
}
