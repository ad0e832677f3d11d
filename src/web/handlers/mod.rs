//! HTML template rendering handlers.

mod index;
mod manage;
mod redirect;

pub use index::index_handler;
pub use manage::manage_handler;
pub use redirect::redirect_handler;

use askama::Template;
use askama_web::WebTemplate;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::state::SiteSettings;

/// Layout fields shared by every page.
pub struct Page {
    pub app_title: String,
    pub title: String,
    pub version: String,
    /// Adds `<meta name="robots" content="noindex">`.
    pub noindex: bool,
}

impl Page {
    pub fn new(site: &SiteSettings, title: impl Into<String>, noindex: bool) -> Self {
        Self {
            app_title: site.app_title.clone(),
            title: title.into(),
            version: site.version.clone(),
            noindex,
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub page: Page,
}

/// 404 page for unknown links and hosts outside the allow-list.
pub fn not_found_page(site: &SiteSettings) -> Response {
    (
        StatusCode::NOT_FOUND,
        NotFoundTemplate {
            page: Page::new(site, "Error 404", true),
        },
    )
        .into_response()
}
