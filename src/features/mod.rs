pub mod health;
pub mod prompts;
