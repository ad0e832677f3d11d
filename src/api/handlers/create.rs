//! Handler for the link creation endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use validator::Validate;

use crate::api::dto::create::{CreateRequest, CreateResponse};
use crate::application::services::CreateLink;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/create`
///
/// # Request Body
///
/// ```json
/// {
///   "destination": "https://example.com",
///   "domain": "nimiq.link",
///   "hcaptchaToken": "...",
///   "friendlyCaptchaToken": "..."
/// }
/// ```
///
/// Only the token of the active CAPTCHA provider is read, and only when a
/// provider is enabled.
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "shortUrl": "https://nimiq.link/aB3xY9",
///   "editPassword": "9f86d081884c7d659a2feaa0c55ad015"
/// }
/// ```
///
/// # Errors
///
/// - 400 "Missing parameters." / "Unknown domain." / "Captcha invalid." /
///   "Destination is not a valid URL." / Safe Browsing rejection
/// - 500 "Captcha verification failed." / "URL safety check failed." /
///   database failures
pub async fn create_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateRequest>, JsonRejection>,
) -> Result<Json<CreateResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let captcha_token = payload.captcha_token(state.link_service.captcha_provider());

    let created = state
        .link_service
        .create(CreateLink {
            destination: payload.destination.unwrap_or_default(),
            domain: payload.domain.unwrap_or_default(),
            captcha_token,
        })
        .await?;

    Ok(Json(CreateResponse {
        success: true,
        short_url: created.short_url,
        edit_password: created.edit_password,
    }))
}
