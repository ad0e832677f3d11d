//! DTOs for the link creation endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::infrastructure::captcha::CaptchaProvider;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    #[validate(required, length(min = 1))]
    pub destination: Option<String>,

    #[validate(required, length(min = 1))]
    pub domain: Option<String>,

    pub hcaptcha_token: Option<String>,

    pub friendly_captcha_token: Option<String>,
}

impl CreateRequest {
    /// Token for `provider`; the other provider's field is ignored.
    pub fn captcha_token(&self, provider: Option<CaptchaProvider>) -> Option<String> {
        match provider? {
            CaptchaProvider::HCaptcha => self.hcaptcha_token.clone(),
            CaptchaProvider::FriendlyCaptcha => self.friendly_captcha_token.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResponse {
    pub success: bool,
    pub short_url: String,
    /// Shown once. Only its Argon2 hash is stored.
    pub edit_password: String,
}
