//! Error types for the service.
//!
//! Every failure surfaced by the service layer is one of these variants;
//! handlers rely on the `ResponseError` impl to turn them into HTTP
//! responses. None of them is retryable by the system itself: each one is
//! resolved by the caller correcting input or authorization.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};

/// Result type for service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Rejected input (empty text, malformed payload)
    #[error("validation error: {0}")]
    Validation(String),

    /// Caller is anonymous but the operation requires an author
    #[error("authentication required: {0}")]
    Unauthorized(String),

    /// Caller is authenticated but does not own the resource
    #[error("permission denied: {0}")]
    Forbidden(String),

    /// Unknown post, group or user
    #[error("not found: {0}")]
    NotFound(String),

    /// Database operation failed
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal server error
    #[error("internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        HttpResponse::build(status).json(serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}
