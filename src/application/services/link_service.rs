//! Link creation and administration service.

use std::sync::Arc;

use uuid::Uuid;

use crate::config::Config;
use crate::domain::entities::{DailyClicks, DomainList, Link, NewLink, short_url};
use crate::domain::repositories::{LinkRepository, StatsRepository};
use crate::error::{
    AppError, INVALID_DESTINATION, NOT_FOUND, UNKNOWN_DOMAIN, UNSAFE_DESTINATION, WRONG_PASSWORD,
};
use crate::infrastructure::captcha::{CaptchaProvider, CaptchaVerifier};
use crate::infrastructure::reputation::ReputationChecker;
use crate::utils::password::{hash_password, verify_password};
use crate::utils::slug::{generate_edit_password, generate_slug};
use crate::utils::url_validator::validate_destination;

/// Number of days covered by link statistics, today included.
pub const STATS_DAYS: i32 = 7;

const MAX_SLUG_ATTEMPTS: usize = 10;

/// First path segments routed before `/{slug}`. A slug equal to one of them
/// could never be resolved.
const RESERVED_SLUGS: &[&str] = &["api", "health", "i", "static"];

/// Settings the service needs from [`Config`].
#[derive(Debug, Clone)]
pub struct LinkSettings {
    pub domains: DomainList,
    pub short_characters: String,
    pub short_length: usize,
}

impl LinkSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            domains: config.domains.clone(),
            short_characters: config.short_characters.clone(),
            short_length: config.short_length,
        }
    }
}

/// A creation request after it has been read from the wire.
///
/// `captcha_token` is the token for the active provider, if one was sent.
#[derive(Debug, Clone, Default)]
pub struct CreateLink {
    pub destination: String,
    pub domain: String,
    pub captcha_token: Option<String>,
}

/// Result of a successful creation. `edit_password` is only ever available here.
#[derive(Debug, Clone)]
pub struct CreatedLink {
    pub link: Link,
    pub short_url: String,
    pub edit_password: String,
}

/// Service for creating, inspecting and deleting short links.
///
/// Creation runs the checks in a fixed order and stops at the first failure:
/// domain, CAPTCHA, URL shape, URL host, reputation. Only then is a slug
/// drawn and the link stored.
pub struct LinkService<L: LinkRepository + ?Sized, S: StatsRepository + ?Sized> {
    link_repository: Arc<L>,
    stats_repository: Arc<S>,
    captcha: Option<Arc<dyn CaptchaVerifier>>,
    reputation: Option<Arc<dyn ReputationChecker>>,
    settings: LinkSettings,
}

impl<L: LinkRepository + ?Sized, S: StatsRepository + ?Sized> LinkService<L, S> {
    /// Creates a new link service.
    ///
    /// `captcha` and `reputation` are `None` when the respective check is disabled.
    pub fn new(
        link_repository: Arc<L>,
        stats_repository: Arc<S>,
        captcha: Option<Arc<dyn CaptchaVerifier>>,
        reputation: Option<Arc<dyn ReputationChecker>>,
        settings: LinkSettings,
    ) -> Self {
        Self {
            link_repository,
            stats_repository,
            captcha,
            reputation,
            settings,
        }
    }

    /// Provider whose token must accompany creation requests, if any.
    pub fn captcha_provider(&self) -> Option<CaptchaProvider> {
        self.captcha.as_ref().map(|c| c.provider())
    }

    pub fn checks_reputation(&self) -> bool {
        self.reputation.is_some()
    }

    /// Creates a short link.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] for a missing CAPTCHA token, an unknown
    ///   domain, a rejected CAPTCHA, an invalid or dangerous destination
    /// - [`AppError::Upstream`] if the CAPTCHA or reputation provider fails
    /// - [`AppError::Internal`] on database errors or when no free slug was
    ///   found after repeated attempts
    pub async fn create(&self, request: CreateLink) -> Result<CreatedLink, AppError> {
        let destination = request.destination.trim();
        let domain = request.domain.trim().to_ascii_lowercase();

        let token = request
            .captcha_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());

        if destination.is_empty() || domain.is_empty() {
            return Err(AppError::missing_parameters());
        }
        if self.captcha.is_some() && token.is_none() {
            return Err(AppError::missing_parameters());
        }

        if !self.settings.domains.contains(&domain) {
            return Err(AppError::bad_request(UNKNOWN_DOMAIN));
        }

        if let (Some(captcha), Some(token)) = (&self.captcha, token) {
            captcha.verify(token).await?;
        }

        let destination = validate_destination(destination).map_err(|e| {
            tracing::warn!("Rejected destination {:?}: {}", destination, e);
            AppError::bad_request(INVALID_DESTINATION)
        })?;

        if let Some(reputation) = &self.reputation
            && reputation.is_unsafe(&destination).await?
        {
            tracing::warn!("Rejected dangerous destination {}", destination);
            return Err(AppError::bad_request(UNSAFE_DESTINATION));
        }

        let edit_password = generate_edit_password()
            .map_err(|e| AppError::internal(format!("OS random generator failed: {e}")))?;
        let admin_password_hash = hash_password(&edit_password)
            .map_err(|e| AppError::internal(e.to_string()))?;

        let link = self
            .insert_with_fresh_slug(&destination, &domain, &admin_password_hash)
            .await?;

        tracing::info!("Created link {} on {} ({})", link.slug, link.domain, link.id);

        Ok(CreatedLink {
            short_url: short_url(&link.domain, &link.slug),
            link,
            edit_password,
        })
    }

    /// Draws slugs until one is free on `domain`.
    ///
    /// A taken slug surfaces as [`AppError::Conflict`] from the unique index.
    /// Reserved route names are redrawn without touching the store.
    async fn insert_with_fresh_slug(
        &self,
        destination: &str,
        domain: &str,
        admin_password_hash: &str,
    ) -> Result<Link, AppError> {
        for attempt in 1..=MAX_SLUG_ATTEMPTS {
            let slug = generate_slug(&self.settings.short_characters, self.settings.short_length);
            if RESERVED_SLUGS.contains(&slug.as_str()) {
                tracing::debug!("Drew reserved slug {} (attempt {})", slug, attempt);
                continue;
            }

            let new_link = NewLink {
                id: Uuid::new_v4(),
                destination: destination.to_string(),
                domain: domain.to_string(),
                slug,
                admin_password_hash: admin_password_hash.to_string(),
            };

            match self.link_repository.create(new_link).await {
                Ok(link) => return Ok(link),
                Err(AppError::Conflict(_)) => {
                    tracing::debug!("Slug collision on {} (attempt {})", domain, attempt);
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(format!(
            "No free slug on {domain} after {MAX_SLUG_ATTEMPTS} attempts"
        )))
    }

    /// Deletes a link after checking its edit password.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if `id` is not a UUID or names no active link
    /// - [`AppError::Forbidden`] if the password does not match
    pub async fn delete(&self, id: &str, password: &str) -> Result<(), AppError> {
        let id = Uuid::parse_str(id.trim()).map_err(|_| AppError::not_found(NOT_FOUND))?;

        let link = self
            .link_repository
            .find_active_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(NOT_FOUND))?;

        let matches = verify_password(password, &link.admin_password_hash)
            .map_err(|e| AppError::internal(format!("Link {id}: {e}")))?;

        if !matches {
            tracing::warn!("Wrong edit password for link {}", id);
            return Err(AppError::forbidden(WRONG_PASSWORD));
        }

        if !self
            .link_repository
            .deactivate(id, &link.admin_password_hash)
            .await?
        {
            return Err(AppError::not_found(NOT_FOUND));
        }

        tracing::info!("Deleted link {} on {} ({})", link.slug, link.domain, id);
        Ok(())
    }

    /// Returns the active link for `slug` under `domain`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if there is none.
    pub async fn info(&self, domain: &str, slug: &str) -> Result<Link, AppError> {
        self.link_repository
            .find_active(&domain.trim().to_ascii_lowercase(), slug.trim())
            .await?
            .ok_or_else(|| AppError::not_found(NOT_FOUND))
    }

    /// Returns the daily click counters of the last [`STATS_DAYS`] days.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if there is no active link.
    pub async fn stats(&self, domain: &str, slug: &str) -> Result<Vec<DailyClicks>, AppError> {
        let link = self.info(domain, slug).await?;
        self.stats_repository
            .recent_clicks(link.id, STATS_DAYS)
            .await
    }

    /// Link and statistics together, for the management page.
    pub async fn details(
        &self,
        domain: &str,
        slug: &str,
    ) -> Result<(Link, Vec<DailyClicks>), AppError> {
        let link = self.info(domain, slug).await?;
        let clicks = self
            .stats_repository
            .recent_clicks(link.id, STATS_DAYS)
            .await?;
        Ok((link, clicks))
    }

    /// Checks that the link store answers.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.link_repository.ping().await
    }
}
