#[cfg(test)]
use crate::core::config::{AppConfig, ServiceConfig};
#[cfg(test)]
use crate::features::prompts::{
    store::{memory::MemoryPromptStore, PromptStore},
    PromptService, PromptState,
};
#[cfg(test)]
use axum_test::TestServer;
#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
pub fn test_service_config() -> ServiceConfig {
    ServiceConfig {
        name: "SystemPrompt Management".to_string(),
        version: "2.0.0".to_string(),
        description: "test instance".to_string(),
    }
}

#[cfg(test)]
pub fn test_app_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_allowed_origins: vec!["*".to_string()],
        max_request_body_size: 1024 * 1024,
    }
}

/// Full router over the given store
#[cfg(test)]
pub fn test_server_with(store: Arc<dyn PromptStore>) -> TestServer {
    let state = PromptState::new(
        Arc::new(PromptService::new(store)),
        Arc::new(test_service_config()),
    );
    let app = crate::build_router(state, &test_app_config());
    TestServer::new(app).expect("failed to start test server")
}

/// Full router over an empty in-memory store
#[cfg(test)]
pub fn test_server() -> TestServer {
    test_server_with(Arc::new(MemoryPromptStore::new()))
}
