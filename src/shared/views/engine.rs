//! Template engine for the browser-facing pages using Jinja2 syntax.

use minijinja::{context, Environment};
use thiserror::Error;

pub const VIEW_SUBMIT: &str = "submit_complaint.html";
pub const VIEW_DASHBOARD: &str = "student_dashboard.html";
pub const VIEW_ADMIN: &str = "admin_dashboard.html";

/// Views compiled into the binary so the service does not depend on its working directory
const EMBEDDED_VIEWS: &[(&str, &str)] = &[
    (
        VIEW_SUBMIT,
        include_str!("../../../templates/views/submit_complaint.html"),
    ),
    (
        VIEW_DASHBOARD,
        include_str!("../../../templates/views/student_dashboard.html"),
    ),
    (
        VIEW_ADMIN,
        include_str!("../../../templates/views/admin_dashboard.html"),
    ),
];

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

/// Owns the compiled views; built once at startup and shared behind an `Arc`.
pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl TemplateRenderer {
    pub fn new() -> Result<Self, TemplateError> {
        let mut env = Environment::new();

        for &(name, source) in EMBEDDED_VIEWS {
            env.add_template(name, source)
                .map_err(|e| TemplateError::RenderError(e.to_string()))?;
            tracing::debug!("Loaded template: {}", name);
        }

        Ok(Self { env })
    }

    /// Render a named view. Views take no server-side data beyond the app name.
    pub fn render(&self, name: &str) -> Result<String, TemplateError> {
        let template = self
            .env
            .get_template(name)
            .map_err(|_| TemplateError::NotFound(name.to_string()))?;

        template
            .render(context! { app_name => "Complaint Desk" })
            .map_err(|e| TemplateError::RenderError(e.to_string()))
    }

    /// Names of all loaded views
    pub fn names(&self) -> Vec<String> {
        self.env
            .templates()
            .map(|(name, _)| name.to_string())
            .collect()
    }
}
