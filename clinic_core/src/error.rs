//! Application error types and handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::persistence::PersistenceError;
use crate::validation::ValidationReport;

pub type Result<T> = std::result::Result<T, AppError>;

const MAX_ERROR_CHARS: usize = 200;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationReport),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            AppError::Validation(report) => {
                tracing::debug!("Rejected payload: {}", report);
                json!({
                    "error": "Validation failed",
                    "status": status.as_u16(),
                    "fields": report,
                })
            }
            AppError::Persistence(err) => {
                tracing::error!("Persistence error: {}", err);
                json!({
                    "error": truncate_chars(&err.to_string(), MAX_ERROR_CHARS),
                    "status": status.as_u16(),
                })
            }
        };

        (status, Json(body)).into_response()
    }
}

pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
