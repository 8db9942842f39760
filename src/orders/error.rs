use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::uploads::UploadError;

/// Error types for order operations
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Order not found")]
    NotFound,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("{0}")]
    InvalidStatus(String),

    #[error("products must be an array")]
    ItemsNotASequence,

    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error("Failed to store upload: {0}")]
    UploadFailed(String),
}

impl From<sqlx::Error> for OrderError {
    fn from(err: sqlx::Error) -> Self {
        OrderError::DatabaseError(err.to_string())
    }
}

impl From<UploadError> for OrderError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::InvalidFileType(_) | UploadError::TooLarge => {
                OrderError::InvalidUpload(err.to_string())
            }
            UploadError::Io(io_err) => OrderError::UploadFailed(io_err.to_string()),
        }
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            OrderError::DatabaseError(msg) => {
                // Internal detail is logged, never returned
                error!("Database error in orders: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
            OrderError::NotFound => (StatusCode::NOT_FOUND, "Order not found".to_string()),
            OrderError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            OrderError::InvalidStatus(msg) => (StatusCode::BAD_REQUEST, msg),
            OrderError::ItemsNotASequence => (
                StatusCode::BAD_REQUEST,
                "products must be an array".to_string(),
            ),
            OrderError::InvalidUpload(msg) => (StatusCode::BAD_REQUEST, msg),
            OrderError::UploadFailed(msg) => {
                error!("Upload failure in orders: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
