//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{
    Features, HealthChecks, HealthResponse, ServiceStatus, StoreCheck, StoreStatus,
};
use crate::infrastructure::captcha::CaptchaProvider;
use crate::state::AppState;

/// Reports whether the link store answers, plus which creation checks are on.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Database reachable
/// - **503 Service Unavailable**: Database check failed
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0 (abc1234)",
///   "checks": {
///     "database": { "status": "ok", "message": "Connected" }
///   },
///   "features": { "captcha": "hcaptcha", "safeBrowsing": false, "interstitial": true }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let database = check_database(&state).await;
    let healthy = database.status == StoreStatus::Ok;

    let response = HealthResponse {
        status: if healthy {
            ServiceStatus::Healthy
        } else {
            ServiceStatus::Degraded
        },
        version: state.site.version.clone(),
        checks: HealthChecks { database },
        features: features(&state),
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_database(state: &AppState) -> StoreCheck {
    match state.link_service.ping().await {
        Ok(()) => StoreCheck {
            status: StoreStatus::Ok,
            message: Some("Connected"),
        },
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            StoreCheck {
                status: StoreStatus::Error,
                message: Some("Database unavailable"),
            }
        }
    }
}

fn features(state: &AppState) -> Features {
    let captcha = state
        .link_service
        .captcha_provider()
        .map(|provider| match provider {
            CaptchaProvider::HCaptcha => "hcaptcha",
            CaptchaProvider::FriendlyCaptcha => "friendlycaptcha",
        });

    Features {
        captcha,
        safe_browsing: state.link_service.checks_reputation(),
        interstitial: state.redirect_service.shows_interstitial(),
    }
}
