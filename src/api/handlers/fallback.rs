//! Method fallback for POST-only endpoints.

use crate::error::AppError;

/// Answers any method other than the route's own with 405
/// `{"success": false, "error": "Method unsupported."}`.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
