//! Application layer services implementing business logic.
//!
//! Services consume repository traits and the provider integrations, and
//! give HTTP handlers and pages a small API.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link creation and administration
//! - [`services::redirect_service::RedirectService`] - Short link resolution
//! - [`services::facts`] - "Did you know?" facts for the interstitial page

pub mod services;
