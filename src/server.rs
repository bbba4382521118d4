//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache setup, and Axum server lifecycle.

use crate::config::Config;
use crate::domain::repositories::{AccountRepository, RedirectRepository};
use crate::infrastructure::cache::{AliasCache, MemoryCache, NullCache};
use crate::infrastructure::persistence::{PgAccountRepository, PgRedirectRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool (with acquire timeout)
/// - Migrations
/// - In-process alias cache (or NullCache when disabled)
/// - Axum HTTP server
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
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let cache: Arc<dyn AliasCache> = if config.is_cache_enabled() {
        tracing::info!("Alias cache enabled ({} entries)", config.cache_capacity);
        Arc::new(MemoryCache::new(config.cache_capacity))
    } else {
        tracing::info!("Alias cache disabled (NullCache)");
        Arc::new(NullCache::new())
    };

    let pool = Arc::new(pool);
    let redirects: Arc<dyn RedirectRepository> = Arc::new(PgRedirectRepository::new(pool.clone()));
    let accounts: Arc<dyn AccountRepository> = Arc::new(PgAccountRepository::new(pool));

    let state = AppState::new(redirects, accounts, cache, &config);

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;

    Ok(())
}
