//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{LinkService, LinkSettings, RedirectService, RedirectSettings};
use crate::config::{CaptchaConfig, Config};
use crate::domain::entities::DomainList;
use crate::domain::repositories::{LinkRepository, StatsRepository};
use crate::infrastructure::captcha::{CaptchaProvider, CaptchaVerifier};
use crate::infrastructure::reputation::ReputationChecker;

pub type DynLinkService = LinkService<dyn LinkRepository, dyn StatsRepository>;
pub type DynRedirectService = RedirectService<dyn LinkRepository, dyn StatsRepository>;

/// CAPTCHA widget rendered on the creation form.
#[derive(Debug, Clone)]
pub struct CaptchaWidget {
    pub provider: CaptchaProvider,
    pub site_key: String,
}

/// Values every page needs: title, domains, footer version, CAPTCHA widget.
#[derive(Debug, Clone)]
pub struct SiteSettings {
    pub app_title: String,
    pub version: String,
    pub domains: DomainList,
    pub main_domain: String,
    pub captcha: Option<CaptchaWidget>,
}

impl SiteSettings {
    pub fn from_config(config: &Config) -> Self {
        let captcha = match &config.captcha {
            CaptchaConfig::Disabled => None,
            CaptchaConfig::HCaptcha { site_key, .. } => Some(CaptchaWidget {
                provider: CaptchaProvider::HCaptcha,
                site_key: site_key.clone(),
            }),
            CaptchaConfig::FriendlyCaptcha { site_key, .. } => Some(CaptchaWidget {
                provider: CaptchaProvider::FriendlyCaptcha,
                site_key: site_key.clone(),
            }),
        };

        Self {
            app_title: config.app_title.clone(),
            version: config.version(),
            domains: config.domains.clone(),
            main_domain: config.main_domain.clone(),
            captcha,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<DynLinkService>,
    pub redirect_service: Arc<DynRedirectService>,
    pub site: Arc<SiteSettings>,
}

impl AppState {
    /// Wires services over the given repositories and provider clients.
    ///
    /// `captcha` and `reputation` are `None` when the check is disabled.
    pub fn new(
        config: &Config,
        link_repository: Arc<dyn LinkRepository>,
        stats_repository: Arc<dyn StatsRepository>,
        captcha: Option<Arc<dyn CaptchaVerifier>>,
        reputation: Option<Arc<dyn ReputationChecker>>,
    ) -> Self {
        let link_service = LinkService::new(
            link_repository.clone(),
            stats_repository.clone(),
            captcha,
            reputation,
            LinkSettings::from_config(config),
        );

        let redirect_service = RedirectService::new(
            link_repository,
            stats_repository,
            RedirectSettings::from_config(config),
        );

        Self {
            link_service: Arc::new(link_service),
            redirect_service: Arc::new(redirect_service),
            site: Arc::new(SiteSettings::from_config(config)),
        }
    }
}
