//! Page rendering for the admin UI using Jinja2 syntax.
//!
//! Templates live in `templates/pages/` and are embedded into the binary, so the
//! service does not depend on its working directory at runtime. Every template
//! name ends in `.html`, which turns on minijinja's automatic HTML escaping for
//! all interpolated values.

use minijinja::{Environment, Value};
use std::sync::OnceLock;
use thiserror::Error;

/// Global template environment (read-only after first use)
static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// Embedded page templates as `(name, source)` pairs
const PAGE_TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../../../templates/pages/base.html")),
    ("index.html", include_str!("../../../templates/pages/index.html")),
    ("new.html", include_str!("../../../templates/pages/new.html")),
    ("edit.html", include_str!("../../../templates/pages/edit.html")),
    ("error.html", include_str!("../../../templates/pages/error.html")),
];

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();

    for (name, source) in PAGE_TEMPLATES {
        if let Err(e) = env.add_template(*name, *source) {
            tracing::warn!("Failed to load template {}: {}", name, e);
        } else {
            tracing::debug!("Loaded template: {}", name);
        }
    }

    env
}

/// Get the global template environment
fn get_environment() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(init_environment)
}

/// Render a page template with the given context.
///
/// # Example
/// ```ignore
/// use minijinja::context;
/// use crate::shared::views::render_page;
///
/// let html = render_page("error.html", context! { status => 404, message => "gone" })?;
/// ```
pub fn render_page(template_name: &str, ctx: Value) -> Result<String, TemplateError> {
    let template = get_environment()
        .get_template(template_name)
        .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

    template
        .render(ctx)
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}

/// Check if a template exists
#[cfg(test)]
pub fn template_exists(template_name: &str) -> bool {
    get_environment().get_template(template_name).is_ok()
}
