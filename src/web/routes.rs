//! Page route configuration.

use crate::state::AppState;
use crate::web::handlers::{index_handler, manage_handler, redirect_handler};
use axum::{Router, routing::get};

/// Public pages.
///
/// # Endpoints
///
/// - `GET /`          - Creation form
/// - `GET /{slug}`    - Short link (countdown, redirect, 404 or block page)
/// - `GET /i/{slug}`  - Management page
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler))
        .route("/{slug}", get(redirect_handler))
        .route("/i/{slug}", get(manage_handler))
}
