//! Body of `GET /health`.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Healthy,
    Degraded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreStatus {
    Ok,
    Error,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: ServiceStatus,
    pub version: String,
    pub checks: HealthChecks,
    pub features: Features,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: StoreCheck,
}

#[derive(Debug, Serialize)]
pub struct StoreCheck {
    pub status: StoreStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

/// Creation checks this deployment performs.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Features {
    /// `"hcaptcha"`, `"friendlycaptcha"` or `null`.
    pub captcha: Option<&'static str>,
    pub safe_browsing: bool,
    pub interstitial: bool,
}
