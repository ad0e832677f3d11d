//! Repository trait for per-day click counters.

use crate::domain::entities::DailyClicks;
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for click accounting.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgStatsRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Counts one click for today: inserts the day's row with 1 or increments it.
    ///
    /// Must be atomic under concurrent calls for the same link and day.
    async fn record_click(&self, link_id: Uuid) -> Result<(), AppError>;

    /// Returns the counters of the last `days` days (today included), oldest first.
    ///
    /// Days without clicks have no row and are omitted.
    async fn recent_clicks(&self, link_id: Uuid, days: i32) -> Result<Vec<DailyClicks>, AppError>;
}
