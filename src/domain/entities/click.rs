//! Per-day click counter for a link.

use chrono::NaiveDate;
use serde::Serialize;

/// Number of non-bot visits a link received on one calendar day.
///
/// Rows are keyed by `(link_id, date)` and only ever incremented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct DailyClicks {
    pub date: NaiveDate,
    pub clicks: i32,
}

impl DailyClicks {
    pub fn new(date: NaiveDate, clicks: i32) -> Self {
        Self { date, clicks }
    }
}

/// Sums a series of daily counters.
pub fn total_clicks(days: &[DailyClicks]) -> i64 {
    days.iter().map(|d| i64::from(d.clicks)).sum()
}
