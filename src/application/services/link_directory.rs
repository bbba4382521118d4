//! Cache-backed alias resolution and link mutation service.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, warn};

use crate::domain::entities::{NewRedirect, Redirect};
use crate::domain::repositories::RedirectRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{AliasCache, CacheEntry};
use crate::utils::alias::validate_alias;
use crate::utils::target_url::validate_target;

/// Service orchestrating redirect resolution and mutation.
///
/// Sits on top of an injected [`AliasCache`] and the redirect repository.
/// Every lookup is read-through (negative results are cached as explicit
/// `Missing` markers) and every mutation overwrites or evicts the
/// corresponding cache key after the store write succeeds, so the cache
/// never reflects state the store rejected.
pub struct LinkDirectory {
    repository: Arc<dyn RedirectRepository>,
    cache: Arc<dyn AliasCache>,
}

impl LinkDirectory {
    /// Creates a new directory over a repository and a cache.
    pub fn new(repository: Arc<dyn RedirectRepository>, cache: Arc<dyn AliasCache>) -> Self {
        Self { repository, cache }
    }

    /// Cache-backed lookup that does not touch the hit counter.
    ///
    /// Used by existence checks, alias generation, and the public info
    /// endpoint. Fills the cache on miss, including the not-found marker.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn lookup(&self, alias: &str) -> Result<Option<Redirect>, AppError> {
        if let Some(entry) = self.cache.get(alias).await {
            metrics::counter!("alias_cache_hits_total").increment(1);
            debug!("Cache HIT: {}", alias);
            return Ok(entry.into_redirect());
        }

        metrics::counter!("alias_cache_misses_total").increment(1);
        debug!("Cache MISS: {}", alias);

        let found = self.repository.find_by_alias(alias).await?;

        let entry = match &found {
            Some(redirect) => CacheEntry::Found(redirect.clone()),
            None => CacheEntry::Missing,
        };
        self.cache.insert(alias, entry).await;

        Ok(found)
    }

    /// Resolves an alias for redirection, counting the hit.
    ///
    /// The hit increment is a single atomic store-side update; the cached
    /// copy is refreshed from the returned count so concurrent resolutions
    /// never lose increments at the store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn resolve(&self, alias: &str) -> Result<Option<Redirect>, AppError> {
        let Some(mut redirect) = self.lookup(alias).await? else {
            return Ok(None);
        };

        match self.repository.increment_hits(alias).await? {
            Some(hits) => {
                redirect.hits = hits;
                self.cache
                    .insert(alias, CacheEntry::Found(redirect.clone()))
                    .await;
                metrics::counter!("redirects_resolved_total").increment(1);
                Ok(Some(redirect))
            }
            None => {
                // Row vanished between lookup and increment; drop the stale entry.
                self.cache.insert(alias, CacheEntry::Missing).await;
                Ok(None)
            }
        }
    }

    /// Creates a redirect under one or more aliases.
    ///
    /// Preconditions are all-or-nothing: every alias must be syntactically
    /// valid and free, and the target must be a valid absolute http(s)
    /// URL, otherwise the call fails with no mutation. The insert loop is
    /// best-effort per alias: a row that fails to insert is logged and
    /// skipped while the remaining aliases proceed.
    ///
    /// Returns the redirects actually created.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an empty alias list, a bad
    /// alias, or an invalid target; [`AppError::Conflict`] if any alias
    /// already exists; [`AppError::Internal`] on store errors.
    pub async fn create(
        &self,
        target: &str,
        aliases: &[String],
        owner_id: Option<i64>,
    ) -> Result<Vec<Redirect>, AppError> {
        if aliases.is_empty() {
            return Err(AppError::bad_request(
                "At least one alias is required",
                json!({}),
            ));
        }

        for alias in aliases {
            validate_alias(alias)?;

            if self.lookup(alias).await?.is_some() {
                return Err(AppError::conflict(
                    "Alias already exists",
                    json!({ "alias": alias }),
                ));
            }
        }

        let target = validate_target(target).map_err(|e| {
            AppError::bad_request("Invalid target URL", json!({ "reason": e.to_string() }))
        })?;

        let mut created = Vec::with_capacity(aliases.len());

        for alias in aliases {
            match self
                .repository
                .insert(NewRedirect {
                    alias: alias.clone(),
                    target: target.clone(),
                    owner_id,
                })
                .await
            {
                Ok(redirect) => {
                    self.cache
                        .insert(alias, CacheEntry::Found(redirect.clone()))
                        .await;
                    created.push(redirect);
                }
                Err(e) => {
                    warn!(alias = %alias, error = %e, "skipping alias that failed to insert");
                }
            }
        }

        Ok(created)
    }

    /// Re-points one or more existing aliases at a new target.
    ///
    /// Every alias must already exist, otherwise the whole call fails with
    /// no mutation. The update loop mirrors the create loop's best-effort
    /// policy per row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if any alias is missing,
    /// [`AppError::Validation`] for an empty list or invalid target,
    /// [`AppError::Internal`] on store errors.
    pub async fn update(&self, target: &str, aliases: &[String]) -> Result<Vec<Redirect>, AppError> {
        if aliases.is_empty() {
            return Err(AppError::bad_request(
                "At least one alias is required",
                json!({}),
            ));
        }

        for alias in aliases {
            if self.lookup(alias).await?.is_none() {
                return Err(AppError::not_found(
                    "Alias not found",
                    json!({ "alias": alias }),
                ));
            }
        }

        let target = validate_target(target).map_err(|e| {
            AppError::bad_request("Invalid target URL", json!({ "reason": e.to_string() }))
        })?;

        let mut updated = Vec::with_capacity(aliases.len());

        for alias in aliases {
            match self.repository.update_target(alias, &target).await {
                Ok(Some(redirect)) => {
                    self.cache
                        .insert(alias, CacheEntry::Found(redirect.clone()))
                        .await;
                    updated.push(redirect);
                }
                Ok(None) => {
                    warn!(alias = %alias, "alias disappeared mid-update, skipping");
                }
                Err(e) => {
                    warn!(alias = %alias, error = %e, "skipping alias that failed to update");
                }
            }
        }

        Ok(updated)
    }

    /// Deletes the aliases that exist and evicts their cache entries.
    ///
    /// Aliases that do not exist are silently skipped. Returns the count
    /// actually deleted; 0 is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn delete(&self, aliases: &[String]) -> Result<u64, AppError> {
        let mut deleted = 0u64;

        for alias in aliases {
            if self.repository.delete(alias).await? {
                self.cache.invalidate(alias).await;
                deleted += 1;
            }
        }

        Ok(deleted)
    }

    /// Lists redirects owned by an account, newest first.
    pub async fn list_for_owner(&self, owner_id: i64) -> Result<Vec<Redirect>, AppError> {
        self.repository.list_for_owner(owner_id).await
    }

    /// Lists every redirect, newest first. Administrators only.
    pub async fn list_all(&self) -> Result<Vec<Redirect>, AppError> {
        self.repository.list_all().await
    }
}
