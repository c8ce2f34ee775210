use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::pages::handlers;
use crate::shared::views::TemplateRenderer;

/// Browser-facing pages. `POST /submit` lives in the complaints feature.
pub fn routes(renderer: Arc<TemplateRenderer>) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/submit", get(handlers::submit_page))
        .route("/dashboard", get(handlers::student_dashboard))
        .route("/admin", get(handlers::admin_dashboard))
        .with_state(renderer)
}
