//! Short link resolution.

use std::sync::Arc;

use crate::config::Config;
use crate::domain::entities::DomainList;
use crate::domain::repositories::{LinkRepository, StatsRepository};
use crate::error::AppError;
use crate::utils::slug::strip_manage_marker;
use crate::utils::user_agent::is_bot;

/// Outcome of resolving `GET /{slug}`. Exactly one per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// `slug+`: send the visitor to the management page at `location`.
    Manage { location: String },
    NotFound,
    /// The link exists but was blocked by an operator.
    Locked { reason: String },
    /// Immediate 302 for bots, or for everyone when the interstitial is off.
    Redirect { destination: String },
    /// Countdown page that navigates after `delay` seconds.
    Interstitial { destination: String, delay: u64 },
}

#[derive(Debug, Clone)]
pub struct RedirectSettings {
    pub domains: DomainList,
    pub main_domain: String,
    pub redirect_delay: u64,
    pub skip_interstitial: bool,
}

impl RedirectSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            domains: config.domains.clone(),
            main_domain: config.main_domain.clone(),
            redirect_delay: config.redirect_delay,
            skip_interstitial: config.skip_interstitial,
        }
    }
}

/// Decides what a visitor of a short link gets to see.
///
/// Clicks are counted for every found link requested by a non-bot agent,
/// locked links included: the counter is bumped before the lock check.
pub struct RedirectService<L: LinkRepository + ?Sized, S: StatsRepository + ?Sized> {
    link_repository: Arc<L>,
    stats_repository: Arc<S>,
    settings: RedirectSettings,
}

impl<L: LinkRepository + ?Sized, S: StatsRepository + ?Sized> RedirectService<L, S> {
    pub fn new(link_repository: Arc<L>, stats_repository: Arc<S>, settings: RedirectSettings) -> Self {
        Self {
            link_repository,
            stats_repository,
            settings,
        }
    }

    pub fn shows_interstitial(&self) -> bool {
        !self.settings.skip_interstitial
    }

    /// Resolves `slug` as requested on `host`.
    ///
    /// `host` is the lowercased `Host` header without port. A host outside
    /// the allow-list resolves to [`Resolution::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the lookup or the click upsert fails.
    pub async fn resolve(
        &self,
        host: Option<&str>,
        slug: &str,
        user_agent: Option<&str>,
    ) -> Result<Resolution, AppError> {
        if let Some(bare) = strip_manage_marker(slug) {
            let host = host
                .filter(|h| self.settings.domains.contains(h))
                .unwrap_or(self.settings.main_domain.as_str());
            return Ok(Resolution::Manage {
                location: format!("https://{host}/i/{bare}"),
            });
        }

        let Some(host) = host.filter(|h| self.settings.domains.contains(h)) else {
            return Ok(Resolution::NotFound);
        };

        let Some(link) = self.link_repository.find_active(host, slug).await? else {
            return Ok(Resolution::NotFound);
        };

        let bot = is_bot(user_agent);
        if !bot {
            self.stats_repository.record_click(link.id).await?;
        }

        if link.locked {
            return Ok(Resolution::Locked {
                reason: link.lock_reason_or_unknown().to_string(),
            });
        }

        if bot || self.settings.skip_interstitial {
            tracing::debug!("Direct redirect for {}/{} (bot: {})", host, slug, bot);
            return Ok(Resolution::Redirect {
                destination: link.destination,
            });
        }

        Ok(Resolution::Interstitial {
            destination: link.destination,
            delay: self.settings.redirect_delay,
        })
    }
}
