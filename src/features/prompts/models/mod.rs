pub mod prompt;

pub use prompt::{NewSystemPrompt, SystemPrompt, SystemPromptChanges, DEFAULT_CATEGORY};
