//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

const LINK_COLUMNS: &str = "id, destination, domain, slug, active, locked, lock_reason, \
                            admin_password_hash, created_at";

/// PostgreSQL repository for link storage and retrieval.
///
/// Every method checks a connection out of the pool for the duration of a
/// single statement.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let sql = format!(
            r#"
            INSERT INTO links (id, destination, domain, slug, admin_password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {LINK_COLUMNS}
            "#
        );

        let link = sqlx::query_as::<_, Link>(&sql)
            .bind(new_link.id)
            .bind(&new_link.destination)
            .bind(&new_link.domain)
            .bind(&new_link.slug)
            .bind(&new_link.admin_password_hash)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(link)
    }

    async fn find_active(&self, domain: &str, slug: &str) -> Result<Option<Link>, AppError> {
        let sql = format!(
            r#"
            SELECT {LINK_COLUMNS}
            FROM links
            WHERE active AND domain = $1 AND slug = $2
            LIMIT 1
            "#
        );

        let link = sqlx::query_as::<_, Link>(&sql)
            .bind(domain)
            .bind(slug)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(link)
    }

    async fn find_active_by_id(&self, id: Uuid) -> Result<Option<Link>, AppError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM links WHERE active AND id = $1");

        let link = sqlx::query_as::<_, Link>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(link)
    }

    async fn deactivate(&self, id: Uuid, admin_password_hash: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE links
            SET active = FALSE
            WHERE id = $1 AND admin_password_hash = $2 AND active
            "#,
        )
        .bind(id)
        .bind(admin_password_hash)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_lock(
        &self,
        domain: &str,
        slug: &str,
        locked: bool,
        reason: Option<String>,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE links
            SET locked = $3, lock_reason = $4
            WHERE active AND domain = $1 AND slug = $2
            "#,
        )
        .bind(domain)
        .bind(slug)
        .bind(locked)
        .bind(reason)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
