//! FriendlyCaptcha siteverify client.

use async_trait::async_trait;
use serde::Serialize;

use super::{CaptchaProvider, CaptchaVerifier, interpret};
use crate::error::AppError;

/// Verifies FriendlyCaptcha puzzle solutions with a JSON POST.
pub struct FriendlyCaptchaVerifier {
    client: reqwest::Client,
    site_key: String,
    secret: String,
    verify_url: String,
}

#[derive(Serialize)]
struct VerifyRequest<'a> {
    solution: &'a str,
    secret: &'a str,
    sitekey: &'a str,
}

impl FriendlyCaptchaVerifier {
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
impl CaptchaVerifier for FriendlyCaptchaVerifier {
    fn provider(&self) -> CaptchaProvider {
        CaptchaProvider::FriendlyCaptcha
    }

    async fn verify(&self, token: &str) -> Result<(), AppError> {
        let payload = VerifyRequest {
            solution: token,
            secret: &self.secret,
            sitekey: &self.site_key,
        };

        let result = self
            .client
            .post(&self.verify_url)
            .json(&payload)
            .send()
            .await;

        interpret("FriendlyCaptcha", result).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::captcha::test_support::spawn_provider;
    use axum::http::StatusCode;
    use serde_json::json;

    fn verifier(url: String) -> FriendlyCaptchaVerifier {
        FriendlyCaptchaVerifier::new(reqwest::Client::new(), "site".into(), "secret".into(), url)
    }

    #[tokio::test]
    async fn test_accepts_successful_solution() {
        let url = spawn_provider(StatusCode::OK, json!({ "success": true })).await;
        assert!(verifier(url).verify("solution").await.is_ok());
    }

    #[tokio::test]
    async fn test_rejected_solution_is_validation_error() {
        let url = spawn_provider(
            StatusCode::OK,
            json!({ "success": false, "errors": ["solution_invalid"] }),
        )
        .await;

        let err = verifier(url).verify("solution").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_bad_request_from_provider_is_upstream_error() {
        let url = spawn_provider(StatusCode::BAD_REQUEST, json!({ "success": false })).await;

        let err = verifier(url).verify("solution").await.unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }
}
