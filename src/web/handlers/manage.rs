//! Link management page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
};

use super::{Page, not_found_page};
use crate::domain::entities::{DailyClicks, Link, total_clicks};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::extract_domain::extract_domain;

#[derive(Template, WebTemplate)]
#[template(path = "manage.html")]
pub struct ManageTemplate {
    pub page: Page,
    pub link: Link,
    pub short_url: String,
    pub created: String,
    pub lock_reason: String,
    pub clicks: Vec<DailyClicks>,
    pub total_clicks: i64,
}

/// Shows a link's details, its last seven days of clicks and a delete form.
///
/// # Endpoint
///
/// `GET /i/{slug}` on one of the configured domains
///
/// The delete form posts `{id, password}` to `/api/delete` from the browser.
pub async fn manage_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let Some(host) = extract_domain(&headers).filter(|h| state.site.domains.contains(h)) else {
        return Ok(not_found_page(&state.site));
    };

    let (link, clicks) = match state.link_service.details(&host, &slug).await {
        Ok(details) => details,
        Err(AppError::NotFound(_)) => return Ok(not_found_page(&state.site)),
        Err(e) => return Err(e),
    };

    let template = ManageTemplate {
        page: Page::new(&state.site, format!("Manage {}/{}", link.domain, link.slug), true),
        short_url: link.short_url(),
        created: link.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        lock_reason: link.lock_reason_or_unknown().to_string(),
        total_clicks: total_clicks(&clicks),
        clicks,
        link,
    };

    Ok(template.into_response())
}
