//! HTML views for the admin pages.

pub mod engine;

pub use engine::{render_page, TemplateError};
