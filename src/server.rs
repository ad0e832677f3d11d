//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, provider clients and the Axum
//! server lifecycle.

use crate::api::middleware::rate_limit;
use crate::config::Config;
use crate::domain::repositories::{LinkRepository, StatsRepository};
use crate::infrastructure::captcha;
use crate::infrastructure::http::build_client;
use crate::infrastructure::persistence::{PgLinkRepository, PgStatsRepository};
use crate::infrastructure::reputation::{ReputationChecker, SafeBrowsingChecker};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Outbound HTTP client, CAPTCHA verifier and Safe Browsing checker
/// - Axum HTTP server with graceful shutdown on SIGINT/SIGTERM
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let client = build_client(config.upstream_timeout).context("Failed to build HTTP client")?;

    let captcha = captcha::from_config(&config.captcha, client.clone());
    if captcha.is_some() {
        tracing::info!("Captcha enabled ({})", config.captcha.name());
    }

    let reputation: Option<Arc<dyn ReputationChecker>> =
        config.safe_browsing_key.as_ref().map(|key| {
            tracing::info!("Safe Browsing enabled");
            Arc::new(SafeBrowsingChecker::new(
                client.clone(),
                key.clone(),
                config.safe_browsing_url.clone(),
            )) as Arc<dyn ReputationChecker>
        });

    let pool = Arc::new(pool);
    let link_repository: Arc<dyn LinkRepository> = Arc::new(PgLinkRepository::new(pool.clone()));
    let stats_repository: Arc<dyn StatsRepository> = Arc::new(PgStatsRepository::new(pool));

    let state = AppState::new(
        &config,
        link_repository,
        stats_repository,
        captcha,
        reputation,
    );

    let rate_limit = rate_limit::layer(config.rate_limit_per_second, config.rate_limit_burst)?;
    let app = app_router(state, rate_limit);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
