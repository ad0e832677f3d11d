//! PostgreSQL implementation of statistics repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::DailyClicks;
use crate::domain::repositories::StatsRepository;
use crate::error::AppError;

/// PostgreSQL repository for per-day click counters.
///
/// Increments go through `ON CONFLICT DO UPDATE`, so concurrent clicks on
/// the same day never lose an update.
pub struct PgStatsRepository {
    pool: Arc<PgPool>,
}

impl PgStatsRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatsRepository for PgStatsRepository {
    async fn record_click(&self, link_id: Uuid) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO clicks (link_id, date, clicks)
            VALUES ($1, CURRENT_DATE, 1)
            ON CONFLICT (link_id, date) DO UPDATE SET clicks = clicks.clicks + 1
            "#,
        )
        .bind(link_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn recent_clicks(&self, link_id: Uuid, days: i32) -> Result<Vec<DailyClicks>, AppError> {
        let rows = sqlx::query_as::<_, DailyClicks>(
            r#"
            SELECT date, clicks
            FROM clicks
            WHERE link_id = $1
              AND date > CURRENT_DATE - $2::int
            ORDER BY date ASC
            "#,
        )
        .bind(link_id)
        .bind(days)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows)
    }
}
