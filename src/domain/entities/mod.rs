//! Core domain entities.
//!
//! - [`Link`] - A short link and its administrative state
//! - [`DailyClicks`] - Per-day click counter of a link
//! - [`DomainList`] - Allow-list of short link domains
//!
//! `NewLink` carries the data needed to insert a link.

pub mod click;
pub mod domain;
pub mod link;

pub use click::{DailyClicks, total_clicks};
pub use domain::DomainList;
pub use link::{Link, NewLink, short_url};
