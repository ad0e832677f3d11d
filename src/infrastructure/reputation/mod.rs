//! Destination reputation checks.
//!
//! The check is optional: when it is disabled there is no checker at all and
//! link creation skips the step.

mod safe_browsing;

pub use safe_browsing::SafeBrowsingChecker;

use async_trait::async_trait;

use crate::error::AppError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReputationChecker: Send + Sync {
    /// Returns `Ok(true)` when the service flags `url` as dangerous.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] if the service cannot be reached or
    /// answers with a non-200 status.
    async fn is_unsafe(&self, url: &str) -> Result<bool, AppError>;
}
