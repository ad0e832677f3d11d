#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::routing::get;
use chrono::{NaiveDate, Utc};
use nimiq_link::api;
use nimiq_link::api::handlers::health_handler;
use nimiq_link::config::{CaptchaConfig, Config};
use nimiq_link::domain::entities::{DailyClicks, DomainList, Link, NewLink};
use nimiq_link::domain::repositories::{LinkRepository, StatsRepository};
use nimiq_link::error::AppError;
use nimiq_link::infrastructure::captcha::{CaptchaProvider, CaptchaVerifier};
use nimiq_link::state::AppState;
use nimiq_link::utils::password::hash_password;
use nimiq_link::web;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub const BROWSER_UA: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0";
pub const CRAWLER_UA: &str =
    "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)";

/// Link store kept in memory, with the same uniqueness rule as the
/// `links_domain_slug_active` index.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    links: Mutex<Vec<Link>>,
    offline: AtomicBool,
}

impl InMemoryLinkRepository {
    pub fn all(&self) -> Vec<Link> {
        self.links.lock().unwrap().clone()
    }

    pub fn get(&self, domain: &str, slug: &str) -> Option<Link> {
        self.all()
            .into_iter()
            .find(|l| l.domain == domain && l.slug == slug)
    }

    pub fn insert(&self, link: Link) {
        self.links.lock().unwrap().push(link);
    }

    /// Makes every call fail as if the database were gone.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), AppError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AppError::internal("connection refused"));
        }
        Ok(())
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        self.check_online()?;
        let mut links = self.links.lock().unwrap();

        if links
            .iter()
            .any(|l| l.active && l.domain == new_link.domain && l.slug == new_link.slug)
        {
            return Err(AppError::conflict("duplicate key value"));
        }

        let link = Link {
            id: new_link.id,
            destination: new_link.destination,
            domain: new_link.domain,
            slug: new_link.slug,
            active: true,
            locked: false,
            lock_reason: None,
            admin_password_hash: new_link.admin_password_hash,
            created_at: Utc::now(),
        };
        links.push(link.clone());

        Ok(link)
    }

    async fn find_active(&self, domain: &str, slug: &str) -> Result<Option<Link>, AppError> {
        self.check_online()?;
        Ok(self
            .all()
            .into_iter()
            .find(|l| l.active && l.domain == domain && l.slug == slug))
    }

    async fn find_active_by_id(&self, id: Uuid) -> Result<Option<Link>, AppError> {
        self.check_online()?;
        Ok(self.all().into_iter().find(|l| l.active && l.id == id))
    }

    async fn deactivate(&self, id: Uuid, admin_password_hash: &str) -> Result<bool, AppError> {
        self.check_online()?;
        let mut links = self.links.lock().unwrap();
        match links
            .iter_mut()
            .find(|l| l.active && l.id == id && l.admin_password_hash == admin_password_hash)
        {
            Some(link) => {
                link.active = false;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_lock(
        &self,
        domain: &str,
        slug: &str,
        locked: bool,
        reason: Option<String>,
    ) -> Result<bool, AppError> {
        self.check_online()?;
        let mut links = self.links.lock().unwrap();
        match links
            .iter_mut()
            .find(|l| l.active && l.domain == domain && l.slug == slug)
        {
            Some(link) => {
                link.locked = locked;
                link.lock_reason = reason;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check_online()
    }
}

/// Per-day click counters kept in memory.
#[derive(Default)]
pub struct InMemoryStatsRepository {
    clicks: Mutex<HashMap<(Uuid, NaiveDate), i32>>,
}

impl InMemoryStatsRepository {
    pub fn set(&self, link_id: Uuid, date: NaiveDate, clicks: i32) {
        self.clicks.lock().unwrap().insert((link_id, date), clicks);
    }

    pub fn today(&self, link_id: Uuid) -> i32 {
        let today = Utc::now().date_naive();
        self.clicks
            .lock()
            .unwrap()
            .get(&(link_id, today))
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl StatsRepository for InMemoryStatsRepository {
    async fn record_click(&self, link_id: Uuid) -> Result<(), AppError> {
        let today = Utc::now().date_naive();
        *self.clicks.lock().unwrap().entry((link_id, today)).or_insert(0) += 1;
        Ok(())
    }

    async fn recent_clicks(&self, link_id: Uuid, days: i32) -> Result<Vec<DailyClicks>, AppError> {
        let today = Utc::now().date_naive();
        let oldest = today - chrono::Days::new(days as u64);

        let mut rows: Vec<DailyClicks> = self
            .clicks
            .lock()
            .unwrap()
            .iter()
            .filter(|((id, date), _)| *id == link_id && *date > oldest && *date <= today)
            .map(|((_, date), clicks)| DailyClicks::new(*date, *clicks))
            .collect();
        rows.sort_by_key(|row| row.date);

        Ok(rows)
    }
}

/// Accepts the token `"pass"` and rejects everything else.
pub struct StaticCaptcha;

#[async_trait]
impl CaptchaVerifier for StaticCaptcha {
    fn provider(&self) -> CaptchaProvider {
        CaptchaProvider::HCaptcha
    }

    async fn verify(&self, token: &str) -> Result<(), AppError> {
        if token == "pass" {
            Ok(())
        } else {
            Err(AppError::bad_request(nimiq_link::error::CAPTCHA_INVALID))
        }
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/unused".to_string(),
        listen_addr: "127.0.0.1:0".to_string(),
        log_level: "debug".to_string(),
        log_format: "text".to_string(),
        db_max_connections: 1,
        db_connect_timeout: 1,
        db_idle_timeout: 1,
        db_max_lifetime: 1,
        app_title: "Nimiq.link".to_string(),
        domains: DomainList::parse("a.tld,b.tld"),
        main_domain: "a.tld".to_string(),
        redirect_delay: 5,
        skip_interstitial: false,
        short_characters: "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789"
            .to_string(),
        short_length: 6,
        captcha: CaptchaConfig::Disabled,
        safe_browsing_key: None,
        safe_browsing_url: "http://127.0.0.1:9/unused".to_string(),
        upstream_timeout: 1,
        rate_limit_per_second: 100,
        rate_limit_burst: 100,
        git_sha: Some("abc1234".to_string()),
    }
}

pub struct TestContext {
    pub state: AppState,
    pub links: Arc<InMemoryLinkRepository>,
    pub stats: Arc<InMemoryStatsRepository>,
}

pub fn create_test_state() -> TestContext {
    create_test_state_with(&test_config(), None)
}

pub fn create_test_state_with(
    config: &Config,
    captcha: Option<Arc<dyn CaptchaVerifier>>,
) -> TestContext {
    let links = Arc::new(InMemoryLinkRepository::default());
    let stats = Arc::new(InMemoryStatsRepository::default());

    let state = AppState::new(config, links.clone(), stats.clone(), captcha, None);

    TestContext {
        state,
        links,
        stats,
    }
}

/// Pages, `/health` and `/api` without the per-IP limiter.
pub fn full_router(state: AppState) -> Router {
    Router::new()
        .merge(web::routes::routes())
        .route("/health", get(health_handler))
        .nest("/api", api::routes::routes())
        .with_state(state)
}

/// Stores an active link whose edit password is `password`.
pub fn seed_link(
    links: &InMemoryLinkRepository,
    domain: &str,
    slug: &str,
    destination: &str,
    password: &str,
) -> Link {
    let link = Link {
        id: Uuid::new_v4(),
        destination: destination.to_string(),
        domain: domain.to_string(),
        slug: slug.to_string(),
        active: true,
        locked: false,
        lock_reason: None,
        admin_password_hash: hash_password(password).unwrap(),
        created_at: Utc::now(),
    };
    links.insert(link.clone());
    link
}
