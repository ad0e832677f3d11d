//! Infrastructure layer for external integrations.
//!
//! Implements interfaces defined by the domain and application layers.
//!
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`captcha`] - hCaptcha and FriendlyCaptcha verification
//! - [`reputation`] - Google Safe Browsing lookups
//! - [`http`] - Shared outbound HTTP client

pub mod captcha;
pub mod http;
pub mod persistence;
pub mod reputation;
