//! Application error type and its HTTP representation.
//!
//! Every failure a client can observe is rendered as
//! `{"success": false, "error": "<human readable message>"}` with a status
//! code derived from the variant.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

pub const MISSING_PARAMETERS: &str = "Missing parameters.";
pub const METHOD_UNSUPPORTED: &str = "Method unsupported.";
pub const NOT_FOUND: &str = "Not found.";
pub const UNKNOWN_DOMAIN: &str = "Unknown domain.";
pub const WRONG_PASSWORD: &str = "Wrong password.";
pub const INVALID_DESTINATION: &str = "Destination is not a valid URL.";
pub const CAPTCHA_INVALID: &str = "Captcha invalid.";
pub const CAPTCHA_FAILED: &str = "Captcha verification failed.";
pub const UNSAFE_DESTINATION: &str = "URL was detected as dangerous by Google Safe Browsing.";
pub const SAFETY_CHECK_FAILED: &str = "URL safety check failed.";
pub const TOO_MANY_REQUESTS: &str = "Too many requests.";
const UNEXPECTED: &str = "An unexpected error has occurred.";

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing or malformed input the client can correct.
    #[error("{0}")]
    Validation(String),
    /// Wrong edit password.
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{METHOD_UNSUPPORTED}")]
    MethodNotAllowed,
    /// Per-IP rate limit exceeded.
    #[error("{TOO_MANY_REQUESTS}")]
    TooManyRequests,
    /// Unique constraint violation. Only surfaces when slug regeneration gives up.
    #[error("{0}")]
    Conflict(String),
    /// CAPTCHA or reputation provider unreachable or answered with a non-200 status.
    #[error("{0}")]
    Upstream(String),
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn missing_parameters() -> Self {
        Self::bad_request(MISSING_PARAMETERS)
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Upstream(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match self {
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                UNEXPECTED.to_string()
            }
            AppError::Conflict(detail) => {
                tracing::error!("Conflict: {}", detail);
                UNEXPECTED.to_string()
            }
            other => other.to_string(),
        };

        let body = ErrorBody {
            success: false,
            error: message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::conflict(format!(
                "Unique constraint violation: {}",
                db.constraint().unwrap_or("unknown")
            ));
        }

        AppError::internal(format!("Database error: {e}"))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(_: validator::ValidationErrors) -> Self {
        AppError::missing_parameters()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        AppError::missing_parameters()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::bad_request("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::forbidden("x").status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::MethodNotAllowed.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            AppError::TooManyRequests.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            AppError::upstream("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_method_not_allowed_message() {
        assert_eq!(AppError::MethodNotAllowed.to_string(), "Method unsupported.");
    }

    #[test]
    fn test_validation_errors_map_to_missing_parameters() {
        let err: AppError = validator::ValidationErrors::new().into();
        assert!(matches!(err, AppError::Validation(ref m) if m == MISSING_PARAMETERS));
    }
}
