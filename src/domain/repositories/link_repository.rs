//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for managing short links.
///
/// Every lookup only considers active links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new active link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the slug is already taken on the domain.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds the active link for `slug` under `domain`.
    async fn find_active(&self, domain: &str, slug: &str) -> Result<Option<Link>, AppError>;

    /// Finds an active link by its id.
    async fn find_active_by_id(&self, id: Uuid) -> Result<Option<Link>, AppError>;

    /// Soft-deletes a link.
    ///
    /// The update only applies while the stored hash still equals
    /// `admin_password_hash`. Returns `Ok(false)` when no row was changed.
    async fn deactivate(&self, id: Uuid, admin_password_hash: &str) -> Result<bool, AppError>;

    /// Sets or clears the administrative lock of an active link.
    ///
    /// Returns `Ok(false)` when no active link matches.
    async fn set_lock(
        &self,
        domain: &str,
        slug: &str,
        locked: bool,
        reason: Option<String>,
    ) -> Result<bool, AppError>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
