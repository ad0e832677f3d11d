//! hCaptcha siteverify client.

use async_trait::async_trait;

use super::{CaptchaProvider, CaptchaVerifier, interpret};
use crate::error::AppError;

/// Verifies hCaptcha tokens with a form-encoded POST.
pub struct HCaptchaVerifier {
    client: reqwest::Client,
    site_key: String,
    secret: String,
    verify_url: String,
}

impl HCaptchaVerifier {
    pub fn new(
        client: reqwest::Client,
        site_key: String,
        secret: String,
        verify_url: String,
    ) -> Self {
        Self {
            client,
            site_key,
            secret,
            verify_url,
        }
    }
}

#[async_trait]
impl CaptchaVerifier for HCaptchaVerifier {
    fn provider(&self) -> CaptchaProvider {
        CaptchaProvider::HCaptcha
    }

    async fn verify(&self, token: &str) -> Result<(), AppError> {
        let result = self
            .client
            .post(&self.verify_url)
            .form(&[
                ("response", token),
                ("secret", self.secret.as_str()),
                ("sitekey", self.site_key.as_str()),
            ])
            .send()
            .await;

        interpret("hCaptcha", result).await
    }
}
