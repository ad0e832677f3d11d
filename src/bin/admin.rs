//! Operator CLI for nimiq-link.
//!
//! Links can only be locked from here; the public API has no way to do it.
//!
//! # Usage
//!
//! ```bash
//! # Show a link
//! cargo run --bin admin -- link show nimiq.link aB3xY9
//!
//! # Block a link with a reason shown to visitors
//! cargo run --bin admin -- link lock nimiq.link aB3xY9 --reason "Phishing"
//!
//! # Lift the block
//! cargo run --bin admin -- link unlock nimiq.link aB3xY9
//!
//! # Totals
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`, or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`

use nimiq_link::config::Config;
use nimiq_link::domain::entities::Link;
use nimiq_link::domain::repositories::LinkRepository;
use nimiq_link::infrastructure::persistence::PgLinkRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing nimiq-link.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Inspect, lock and unlock links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum LinkAction {
    /// Show an active link
    Show { domain: String, slug: String },

    /// Block a link; visitors see the reason instead of being redirected
    Lock {
        domain: String,
        slug: String,

        /// Reason shown on the block page (prompted if omitted)
        #[arg(short, long)]
        reason: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Remove a block
    Unlock { domain: String, slug: String },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;
    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_link_action(action: LinkAction, pool: &PgPool) -> Result<()> {
    let repo = PgLinkRepository::new(Arc::new(pool.clone()));

    match action {
        LinkAction::Show { domain, slug } => {
            let link = find_link(&repo, &domain, &slug).await?;
            print_link(&link);
        }
        LinkAction::Lock {
            domain,
            slug,
            reason,
            yes,
        } => lock_link(&repo, &domain, &slug, reason, yes).await?,
        LinkAction::Unlock { domain, slug } => unlock_link(&repo, &domain, &slug).await?,
    }

    Ok(())
}

async fn find_link(repo: &PgLinkRepository, domain: &str, slug: &str) -> Result<Link> {
    repo.find_active(&domain.to_ascii_lowercase(), slug)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .with_context(|| format!("No active link {domain}/{slug}"))
}

fn print_link(link: &Link) {
    println!("{}", "🔗 Link".bright_blue().bold());
    println!();
    println!("  Short URL:   {}", link.short_url().cyan());
    println!("  ID:          {}", link.id.to_string().bright_black());
    println!("  Destination: {}", link.destination);
    println!(
        "  Created:     {}",
        link.created_at.format("%Y-%m-%d %H:%M").to_string().bright_black()
    );
    if link.locked {
        println!(
            "  Status:      {} ({})",
            "LOCKED".red(),
            link.lock_reason_or_unknown()
        );
    } else {
        println!("  Status:      {}", "ACTIVE".green());
    }
    println!();
}

/// Locks a link after showing it and asking for confirmation.
async fn lock_link(
    repo: &PgLinkRepository,
    domain: &str,
    slug: &str,
    reason: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    let link = find_link(repo, domain, slug).await?;
    print_link(&link);

    if link.locked {
        println!("{}", "⚠️  This link is already locked".yellow());
    }

    let reason = match reason {
        Some(r) => r,
        None => Input::<String>::new()
            .with_prompt("Reason")
            .allow_empty(true)
            .interact_text()?,
    };
    let reason = Some(reason.trim().to_string()).filter(|r| !r.is_empty());

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Lock this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let updated = repo
        .set_lock(&link.domain, &link.slug, true, reason)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to lock link: {}", e))?;

    if updated {
        println!("{}", "✅ Link locked".green().bold());
    } else {
        println!("{}", "⚠️  Link was deleted in the meantime".yellow());
    }
    println!();

    Ok(())
}

async fn unlock_link(repo: &PgLinkRepository, domain: &str, slug: &str) -> Result<()> {
    let link = find_link(repo, domain, slug).await?;

    if !link.locked {
        println!("{}", "⚠️  This link is not locked".yellow());
        return Ok(());
    }

    repo.set_lock(&link.domain, &link.slug, false, None)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to unlock link: {}", e))?;

    println!("{}", "✅ Link unlocked".green().bold());
    println!();

    Ok(())
}

/// Displays system statistics.
///
/// Shows:
/// - Active, deleted and locked links
/// - Total recorded clicks
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let (active, deleted, locked): (i64, i64, i64) = sqlx::query_as(
        r#"
        SELECT
            COUNT(*) FILTER (WHERE active),
            COUNT(*) FILTER (WHERE NOT active),
            COUNT(*) FILTER (WHERE active AND locked)
        FROM links
        "#,
    )
    .fetch_one(pool)
    .await?;

    let clicks: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(clicks), 0)::BIGINT FROM clicks")
        .fetch_one(pool)
        .await?;

    println!("  Active links:  {}", active.to_string().bright_green().bold());
    println!("  Deleted links: {}", deleted.to_string().bright_black());
    println!("  Locked links:  {}", locked.to_string().red());
    println!("  Clicks:        {}", clicks.to_string().bright_green().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let migrations: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM _sqlx_migrations WHERE success",
            )
            .fetch_one(pool)
            .await
            .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
