use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::types::ActionResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_)
            | AppError::Storage(_)
            | AppError::Internal(_)
            | AppError::ExternalServiceError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self {
            AppError::Validation(ref msg) | AppError::BadRequest(ref msg) => {
                tracing::warn!("Rejected request: {}", msg);
            }
            AppError::Database(ref e) => tracing::error!("Database error: {:?}", e),
            ref other => tracing::error!("{}", other),
        }

        (status, Json(ActionResponse::error(self.to_string()))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
