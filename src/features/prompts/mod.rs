pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod seed;
pub mod services;
pub mod state;
pub mod store;

pub use services::PromptService;
pub use state::PromptState;
