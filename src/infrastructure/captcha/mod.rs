//! CAPTCHA verification against an external provider.
//!
//! Exactly one provider is active at a time (see [`crate::config::CaptchaConfig`]).
//! Both providers follow the same contract:
//!
//! - provider answered 200 with `success: true` → `Ok(())`
//! - provider answered 200 with `success: false` → [`AppError::Validation`]
//! - provider unreachable, non-200, or unreadable body → [`AppError::Upstream`]

mod friendly_captcha;
mod hcaptcha;

pub use friendly_captcha::FriendlyCaptchaVerifier;
pub use hcaptcha::HCaptchaVerifier;

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use crate::config::CaptchaConfig;
use crate::error::{AppError, CAPTCHA_FAILED, CAPTCHA_INVALID};

/// Identifies which request field carries the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptchaProvider {
    HCaptcha,
    FriendlyCaptcha,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CaptchaVerifier: Send + Sync {
    fn provider(&self) -> CaptchaProvider;

    /// Verifies a token produced by the provider's widget.
    async fn verify(&self, token: &str) -> Result<(), AppError>;
}

/// Builds the verifier for the configured provider, or `None` when disabled.
pub fn from_config(
    config: &CaptchaConfig,
    client: reqwest::Client,
) -> Option<Arc<dyn CaptchaVerifier>> {
    match config {
        CaptchaConfig::Disabled => None,
        CaptchaConfig::HCaptcha {
            site_key,
            secret,
            verify_url,
        } => Some(Arc::new(HCaptchaVerifier::new(
            client,
            site_key.clone(),
            secret.clone(),
            verify_url.clone(),
        ))),
        CaptchaConfig::FriendlyCaptcha {
            site_key,
            secret,
            verify_url,
        } => Some(Arc::new(FriendlyCaptchaVerifier::new(
            client,
            site_key.clone(),
            secret.clone(),
            verify_url.clone(),
        ))),
    }
}

/// Body shared by both providers' siteverify endpoints.
#[derive(Debug, Deserialize)]
struct SiteVerifyResponse {
    #[serde(default)]
    success: bool,
}

/// Maps a siteverify HTTP exchange onto the verification contract.
async fn interpret(
    provider: &str,
    result: reqwest::Result<reqwest::Response>,
) -> Result<(), AppError> {
    let response = result.map_err(|e| {
        tracing::error!("{} request failed: {}", provider, e);
        AppError::upstream(CAPTCHA_FAILED)
    })?;

    if response.status() != reqwest::StatusCode::OK {
        tracing::error!("{} answered with status {}", provider, response.status());
        return Err(AppError::upstream(CAPTCHA_FAILED));
    }

    let body: SiteVerifyResponse = response.json().await.map_err(|e| {
        tracing::error!("{} returned an unreadable body: {}", provider, e);
        AppError::upstream(CAPTCHA_FAILED)
    })?;

    if body.success {
        Ok(())
    } else {
        tracing::debug!("{} rejected the token", provider);
        Err(AppError::bad_request(CAPTCHA_INVALID))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_config_has_no_verifier() {
        assert!(from_config(&CaptchaConfig::Disabled, reqwest::Client::new()).is_none());
    }

    #[test]
    fn test_provider_selection() {
        let hcaptcha = from_config(
            &CaptchaConfig::HCaptcha {
                site_key: "site".into(),
                secret: "secret".into(),
                verify_url: "http://localhost/verify".into(),
            },
            reqwest::Client::new(),
        )
        .unwrap();
        assert_eq!(hcaptcha.provider(), CaptchaProvider::HCaptcha);

        let friendly = from_config(
            &CaptchaConfig::FriendlyCaptcha {
                site_key: "site".into(),
                secret: "secret".into(),
                verify_url: "http://localhost/verify".into(),
            },
            reqwest::Client::new(),
        )
        .unwrap();
        assert_eq!(friendly.provider(), CaptchaProvider::FriendlyCaptcha);
    }
}
