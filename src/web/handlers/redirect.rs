//! Handler for short link visits.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use url::Url;

use super::{Page, not_found_page};
use crate::application::services::Resolution;
use crate::application::services::facts::{Fact, random_fact};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::extract_domain::extract_domain;

/// Countdown page with a meta refresh as fallback for visitors without JS.
#[derive(Template, WebTemplate)]
#[template(path = "redirect.html")]
pub struct InterstitialTemplate {
    pub page: Page,
    pub destination: String,
    pub delay: u64,
    /// Meta refresh fires two seconds after the countdown ends.
    pub refresh: u64,
    pub fact: &'static Fact,
}

#[derive(Template, WebTemplate)]
#[template(path = "locked.html")]
pub struct LockedTemplate {
    pub page: Page,
    pub reason: String,
}

/// Resolves a short link.
///
/// # Endpoint
///
/// `GET /{slug}`
///
/// # Outcomes
///
/// - `{slug}+` → 302 to the management page on the same domain
/// - unknown slug or domain → 404 page
/// - locked link → 403 page with the lock reason
/// - bot, or interstitial disabled → 302 to the destination
/// - otherwise → 200 countdown page
///
/// Clicks are recorded for non-bot visitors of existing links.
pub async fn redirect_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let host = extract_domain(&headers);
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok());

    let resolution = state
        .redirect_service
        .resolve(host.as_deref(), &slug, user_agent)
        .await?;

    let site = &state.site;

    let response = match resolution {
        Resolution::Manage { location } => found(&location)?,
        Resolution::NotFound => not_found_page(site),
        Resolution::Locked { reason } => (
            StatusCode::FORBIDDEN,
            LockedTemplate {
                page: Page::new(site, "Short link disabled", true),
                reason,
            },
        )
            .into_response(),
        Resolution::Redirect { destination } => found(&destination)?,
        Resolution::Interstitial { destination, delay } => {
            let title = match Url::parse(&destination)
                .ok()
                .and_then(|u| u.host_str().map(str::to_string))
            {
                Some(host) => format!("Redirecting to {host}..."),
                None => "Redirecting...".to_string(),
            };

            InterstitialTemplate {
                page: Page::new(site, title, true),
                destination,
                delay,
                refresh: delay + 2,
                fact: random_fact(),
            }
            .into_response()
        }
    };

    Ok(response)
}

/// 302 Found. Non-ASCII destinations are re-serialised by `url` first.
fn found(location: &str) -> Result<Response, AppError> {
    let serialized = Url::parse(location)
        .map(String::from)
        .unwrap_or_else(|_| location.to_string());

    let value = HeaderValue::from_str(&serialized)
        .map_err(|e| AppError::internal(format!("Invalid Location {location:?}: {e}")))?;

    Ok((StatusCode::FOUND, [(header::LOCATION, value)]).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_found_sets_location() {
        let response = found("https://example.com/a?b=c").unwrap();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "https://example.com/a?b=c");
    }

    #[test]
    fn test_found_encodes_unicode() {
        let response = found("https://bücher.example/straße").unwrap();
        assert_eq!(
            response.headers()[header::LOCATION],
            "https://xn--bcher-kva.example/stra%C3%9Fe"
        );
    }
}
