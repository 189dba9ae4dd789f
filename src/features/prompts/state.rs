use std::sync::Arc;

use crate::core::config::ServiceConfig;
use crate::features::prompts::services::PromptService;

/// Shared state for the prompt pages and JSON API
#[derive(Debug, Clone)]
pub struct PromptState {
    pub service: Arc<PromptService>,
    pub info: Arc<ServiceConfig>,
}

impl PromptState {
    pub fn new(service: Arc<PromptService>, info: Arc<ServiceConfig>) -> Self {
        Self { service, info }
    }
}
