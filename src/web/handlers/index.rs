//! Link creation page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};

use super::Page;
use crate::infrastructure::captcha::CaptchaProvider;
use crate::state::AppState;

/// Creation form. The form posts to `/api/create` from the browser.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub page: Page,
    pub domains: Vec<String>,
    pub main_domain: String,
    /// `"hcaptcha"`, `"friendlycaptcha"`, or empty when disabled.
    pub captcha_provider: &'static str,
    pub captcha_site_key: String,
}

/// Renders the creation form.
///
/// # Endpoint
///
/// `GET /`
pub async fn index_handler(State(state): State<AppState>) -> impl IntoResponse {
    let site = &state.site;

    let (captcha_provider, captcha_site_key) = match &site.captcha {
        Some(widget) => (
            match widget.provider {
                CaptchaProvider::HCaptcha => "hcaptcha",
                CaptchaProvider::FriendlyCaptcha => "friendlycaptcha",
            },
            widget.site_key.clone(),
        ),
        None => ("", String::new()),
    };

    IndexTemplate {
        page: Page::new(site, "Shorten a link", false),
        domains: site.domains.iter().map(str::to_string).collect(),
        main_domain: site.main_domain.clone(),
        captcha_provider,
        captcha_site_key,
    }
}
