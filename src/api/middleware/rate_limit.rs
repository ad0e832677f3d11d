//! Rate limiting middleware using token bucket algorithm.

use anyhow::{Context, Result};
use axum::response::{IntoResponse, Response};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorError, GovernorLayer, governor::GovernorConfigBuilder,
    key_extractor::PeerIpKeyExtractor,
};

use crate::error::AppError;

pub type RateLimitLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates the per-IP rate limiter for the `/api` endpoints.
///
/// # Limits
///
/// - **Rate**: `per_second` tokens replenished per second (`RATE_LIMIT_PER_SECOND`)
/// - **Burst**: `burst` requests (`RATE_LIMIT_BURST`)
///
/// Requests exceeding the limit receive `429 Too Many Requests` with the usual
/// JSON error body and a `retry-after` header.
///
/// # Key Extraction
///
/// Rate limits are applied per client IP address extracted from the
/// socket peer address, so the router must be served with connect info.
///
/// # Errors
///
/// Fails if either limit is zero.
pub fn layer(per_second: u64, burst: u32) -> Result<RateLimitLayer> {
    if per_second == 0 {
        anyhow::bail!("Rate limit must allow at least one request per second");
    }

    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond((1000 / per_second).max(1))
            .burst_size(burst)
            .finish()
            .context("Invalid rate limit configuration")?,
    );

    Ok(GovernorLayer::new(governor_conf).error_handler(reject))
}

/// Renders limiter rejections like every other API error.
fn reject(error: GovernorError) -> Response {
    match error {
        GovernorError::TooManyRequests { wait_time, headers } => {
            tracing::debug!("Rate limited, retry in {}s", wait_time);
            let mut response = AppError::TooManyRequests.into_response();
            if let Some(headers) = headers {
                response.headers_mut().extend(headers);
            }
            response
        }
        GovernorError::UnableToExtractKey => {
            AppError::internal("Rate limiter could not determine the client address")
                .into_response()
        }
        GovernorError::Other { code, msg, .. } => AppError::internal(format!(
            "Rate limiter failed with {}: {}",
            code,
            msg.unwrap_or_default()
        ))
        .into_response(),
    }
}
