//! Utility functions shared across layers.
//!
//! - [`slug`] - Slug and edit password generation
//! - [`password`] - Argon2id hashing of edit passwords
//! - [`url_validator`] - Destination URL checks
//! - [`user_agent`] - Automated agent detection
//! - [`extract_domain`] - Domain extraction from the `Host` header

pub mod extract_domain;
pub mod password;
pub mod slug;
pub mod url_validator;
pub mod user_agent;
