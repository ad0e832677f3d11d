//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod create;
pub mod fallback;
pub mod health;
pub mod manage;

pub use create::create_handler;
pub use fallback::method_not_allowed;
pub use health::health_handler;
pub use manage::{delete_handler, info_handler, stats_handler};
