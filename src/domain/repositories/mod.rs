//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access. PostgreSQL implementations live in
//! `crate::infrastructure::persistence`; mock implementations are generated
//! via `mockall` for unit tests.
//!
//! - [`LinkRepository`] - Link storage, lookup and soft deletion
//! - [`StatsRepository`] - Per-day click counters

pub mod link_repository;
pub mod stats_repository;

pub use link_repository::LinkRepository;
pub use stats_repository::StatsRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use stats_repository::MockStatsRepository;
