use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};

use crate::core::error::AppError;
use crate::shared::views::{TemplateRenderer, VIEW_ADMIN, VIEW_DASHBOARD, VIEW_SUBMIT};

pub async fn home() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, "/submit")]).into_response()
}

pub async fn submit_page(
    State(renderer): State<Arc<TemplateRenderer>>,
) -> Result<Html<String>, AppError> {
    render(&renderer, VIEW_SUBMIT)
}

pub async fn student_dashboard(
    State(renderer): State<Arc<TemplateRenderer>>,
) -> Result<Html<String>, AppError> {
    render(&renderer, VIEW_DASHBOARD)
}

pub async fn admin_dashboard(
    State(renderer): State<Arc<TemplateRenderer>>,
) -> Result<Html<String>, AppError> {
    render(&renderer, VIEW_ADMIN)
}

fn render(renderer: &TemplateRenderer, view: &str) -> Result<Html<String>, AppError> {
    renderer
        .render(view)
        .map(Html)
        .map_err(|e| AppError::Internal(e.to_string()))
}
