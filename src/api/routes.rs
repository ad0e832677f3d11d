//! API route configuration.

use crate::api::handlers::{
    create_handler, delete_handler, info_handler, method_not_allowed, stats_handler,
};
use crate::state::AppState;
use axum::{Router, routing::post};

/// Public JSON API. Every endpoint is POST-only; other methods get 405.
///
/// # Endpoints
///
/// - `POST /create` - Create a short link
/// - `POST /delete` - Delete a link with its edit password
/// - `POST /info`   - Link details
/// - `POST /stats`  - Clicks of the last seven days
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_handler).fallback(method_not_allowed))
        .route("/delete", post(delete_handler).fallback(method_not_allowed))
        .route("/info", post(info_handler).fallback(method_not_allowed))
        .route("/stats", post(stats_handler).fallback(method_not_allowed))
}
