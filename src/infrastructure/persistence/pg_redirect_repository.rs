//! PostgreSQL implementation of the redirect repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewRedirect, Redirect};
use crate::domain::repositories::RedirectRepository;
use crate::error::AppError;

/// Row shape shared by every redirect query.
#[derive(sqlx::FromRow)]
struct RedirectRow {
    id: i64,
    alias: String,
    target: String,
    hits: i64,
    owner_id: Option<i64>,
    created_at: DateTime<Utc>,
}

impl From<RedirectRow> for Redirect {
    fn from(row: RedirectRow) -> Self {
        Redirect {
            id: row.id,
            alias: row.alias,
            target: row.target,
            hits: row.hits,
            owner_id: row.owner_id,
            created_at: row.created_at,
        }
    }
}

const REDIRECT_COLUMNS: &str = "id, alias, target, hits, owner_id, created_at";

/// PostgreSQL repository for redirect storage.
///
/// Uses SQLx prepared statements for SQL injection protection. The hit
/// increment is a single `UPDATE ... SET hits = hits + 1` so concurrent
/// resolutions never lose updates.
pub struct PgRedirectRepository {
    pool: Arc<PgPool>,
}

impl PgRedirectRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RedirectRepository for PgRedirectRepository {
    async fn find_by_alias(&self, alias: &str) -> Result<Option<Redirect>, AppError> {
        let row = sqlx::query_as::<_, RedirectRow>(&format!(
            "SELECT {REDIRECT_COLUMNS} FROM redirects WHERE alias = $1"
        ))
        .bind(alias)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn insert(&self, new_redirect: NewRedirect) -> Result<Redirect, AppError> {
        let row = sqlx::query_as::<_, RedirectRow>(&format!(
            "INSERT INTO redirects (alias, target, owner_id) VALUES ($1, $2, $3) \
             RETURNING {REDIRECT_COLUMNS}"
        ))
        .bind(&new_redirect.alias)
        .bind(&new_redirect.target)
        .bind(new_redirect.owner_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn update_target(
        &self,
        alias: &str,
        target: &str,
    ) -> Result<Option<Redirect>, AppError> {
        let row = sqlx::query_as::<_, RedirectRow>(&format!(
            "UPDATE redirects SET target = $2 WHERE alias = $1 RETURNING {REDIRECT_COLUMNS}"
        ))
        .bind(alias)
        .bind(target)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn increment_hits(&self, alias: &str) -> Result<Option<i64>, AppError> {
        let hits = sqlx::query_scalar::<_, i64>(
            "UPDATE redirects SET hits = hits + 1 WHERE alias = $1 RETURNING hits",
        )
        .bind(alias)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(hits)
    }

    async fn delete(&self, alias: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM redirects WHERE alias = $1")
            .bind(alias)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_for_owner(&self, owner_id: i64) -> Result<Vec<Redirect>, AppError> {
        let rows = sqlx::query_as::<_, RedirectRow>(&format!(
            "SELECT {REDIRECT_COLUMNS} FROM redirects WHERE owner_id = $1 \
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(owner_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_all(&self) -> Result<Vec<Redirect>, AppError> {
        let rows = sqlx::query_as::<_, RedirectRow>(&format!(
            "SELECT {REDIRECT_COLUMNS} FROM redirects ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
