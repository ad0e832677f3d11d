//! Handlers for the password-protected link administration endpoints.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use validator::Validate;

use crate::api::dto::manage::{DeleteRequest, LinkInfo, LinkLookupRequest};
use crate::api::dto::{DataResponse, SuccessResponse};
use crate::domain::entities::DailyClicks;
use crate::error::AppError;
use crate::state::AppState;

/// Deletes a link.
///
/// # Endpoint
///
/// `POST /api/delete` with `{"id": "<uuid>", "password": "<edit password>"}`
///
/// # Errors
///
/// - 404 "Not found." for an unknown, deleted or malformed id
/// - 403 "Wrong password."
pub async fn delete_handler(
    State(state): State<AppState>,
    payload: Result<Json<DeleteRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let (Some(id), Some(password)) = (payload.id, payload.password) else {
        return Err(AppError::missing_parameters());
    };

    state.link_service.delete(&id, &password).await?;

    Ok(Json(SuccessResponse::ok()))
}

/// Returns a link's public details.
///
/// # Endpoint
///
/// `POST /api/info` with `{"slug": "...", "domain": "..."}`
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "response": {
///     "id": "6f0c...",
///     "destination": "https://example.com",
///     "created": "2024-03-01T12:00:00Z",
///     "locked": false,
///     "lockReason": null
///   }
/// }
/// ```
pub async fn info_handler(
    State(state): State<AppState>,
    payload: Result<Json<LinkLookupRequest>, JsonRejection>,
) -> Result<Json<DataResponse<LinkInfo>>, AppError> {
    let (domain, slug) = lookup_key(payload)?;

    let link = state.link_service.info(&domain, &slug).await?;

    Ok(Json(DataResponse::new(LinkInfo::from(link))))
}

/// Returns the daily click counts of the last seven days, oldest first.
///
/// # Endpoint
///
/// `POST /api/stats` with `{"slug": "...", "domain": "..."}`
///
/// # Response
///
/// ```json
/// { "success": true, "response": [{ "date": "2024-03-01", "clicks": 2 }] }
/// ```
pub async fn stats_handler(
    State(state): State<AppState>,
    payload: Result<Json<LinkLookupRequest>, JsonRejection>,
) -> Result<Json<DataResponse<Vec<DailyClicks>>>, AppError> {
    let (domain, slug) = lookup_key(payload)?;

    let clicks = state.link_service.stats(&domain, &slug).await?;

    Ok(Json(DataResponse::new(clicks)))
}

fn lookup_key(
    payload: Result<Json<LinkLookupRequest>, JsonRejection>,
) -> Result<(String, String), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    match (payload.domain, payload.slug) {
        (Some(domain), Some(slug)) => Ok((domain, slug)),
        _ => Err(AppError::missing_parameters()),
    }
}
