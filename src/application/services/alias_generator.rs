//! Collision-free random alias generation.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use crate::domain::repositories::RedirectRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{AliasCache, CacheEntry};
use crate::utils::alias::random_alias;

/// Attempts per entropy width before escalating.
const ATTEMPT_CEILING: usize = 10;

/// 4 bytes -> 8 hex chars.
const BASE_ENTROPY_BYTES: usize = 4;

/// 6 bytes -> 12 hex chars, used after the ceiling is hit.
const ESCALATED_ENTROPY_BYTES: usize = 6;

/// Service producing aliases guaranteed free at generation time.
///
/// Draws candidates from a CSPRNG and checks them against the cache and
/// store. Iterative with a bounded attempt ceiling: after
/// [`ATTEMPT_CEILING`] collisions at the 8-character width it escalates to
/// 12 characters, keeping worst-case latency bounded even over a densely
/// populated alias space.
pub struct AliasGenerator {
    repository: Arc<dyn RedirectRepository>,
    cache: Arc<dyn AliasCache>,
}

impl AliasGenerator {
    /// Creates a generator over the same repository and cache the
    /// directory uses.
    pub fn new(repository: Arc<dyn RedirectRepository>, cache: Arc<dyn AliasCache>) -> Self {
        Self { repository, cache }
    }

    /// Generates an alias that is not present in the store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if both entropy widths exhaust their
    /// attempt ceilings (practically unreachable below keyspace
    /// saturation) or on store errors.
    pub async fn generate(&self) -> Result<String, AppError> {
        for entropy_bytes in [BASE_ENTROPY_BYTES, ESCALATED_ENTROPY_BYTES] {
            for attempt in 0..ATTEMPT_CEILING {
                let candidate = random_alias(entropy_bytes);

                if self.is_free(&candidate).await? {
                    return Ok(candidate);
                }

                debug!(
                    candidate = %candidate,
                    attempt,
                    width = entropy_bytes * 2,
                    "alias collision, retrying"
                );
            }
        }

        Err(AppError::internal(
            "Failed to generate a unique alias",
            json!({ "reason": "too many collisions" }),
        ))
    }

    /// Checks candidate availability through the cache, falling back to
    /// the store and caching the result either way.
    async fn is_free(&self, alias: &str) -> Result<bool, AppError> {
        match self.cache.get(alias).await {
            Some(CacheEntry::Found(_)) => return Ok(false),
            Some(CacheEntry::Missing) => return Ok(true),
            None => {}
        }

        let found = self.repository.find_by_alias(alias).await?;

        let entry = match &found {
            Some(redirect) => CacheEntry::Found(redirect.clone()),
            None => CacheEntry::Missing,
        };
        self.cache.insert(alias, entry).await;

        Ok(found.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Redirect;
    use crate::domain::repositories::MockRedirectRepository;
    use crate::infrastructure::cache::MemoryCache;
    use chrono::Utc;

    fn generator(repo: MockRedirectRepository) -> AliasGenerator {
        AliasGenerator::new(Arc::new(repo), Arc::new(MemoryCache::new(1000)))
    }

    #[tokio::test]
    async fn generate_returns_eight_hex_chars_when_space_is_empty() {
        let mut repo = MockRedirectRepository::new();
        repo.expect_find_by_alias().times(1).returning(|_| Ok(None));

        let alias = generator(repo).generate().await.unwrap();

        assert_eq!(alias.len(), 8);
        assert!(alias.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn generate_retries_on_collision() {
        let mut repo = MockRedirectRepository::new();
        let mut calls = 0;

        // First candidate collides, second is free.
        repo.expect_find_by_alias().times(2).returning(move |alias| {
            calls += 1;
            if calls == 1 {
                Ok(Some(Redirect {
                    id: 1,
                    alias: alias.to_string(),
                    target: "https://example.com/".to_string(),
                    hits: 0,
                    owner_id: None,
                    created_at: Utc::now(),
                }))
            } else {
                Ok(None)
            }
        });

        let alias = generator(repo).generate().await.unwrap();
        assert_eq!(alias.len(), 8);
    }

    #[tokio::test]
    async fn generate_escalates_entropy_after_ceiling() {
        let mut repo = MockRedirectRepository::new();
        let mut calls = 0usize;

        // Every 8-char candidate collides; the first 12-char one is free.
        repo.expect_find_by_alias().returning(move |alias| {
            calls += 1;
            if alias.len() == 8 {
                Ok(Some(Redirect {
                    id: calls as i64,
                    alias: alias.to_string(),
                    target: "https://example.com/".to_string(),
                    hits: 0,
                    owner_id: None,
                    created_at: Utc::now(),
                }))
            } else {
                Ok(None)
            }
        });

        let alias = generator(repo).generate().await.unwrap();

        assert_eq!(alias.len(), 12);
    }

    #[tokio::test]
    async fn generate_gives_up_after_both_ceilings() {
        let mut repo = MockRedirectRepository::new();

        // Everything collides.
        repo.expect_find_by_alias()
            .times(2 * ATTEMPT_CEILING)
            .returning(|alias| {
                Ok(Some(Redirect {
                    id: 1,
                    alias: alias.to_string(),
                    target: "https://example.com/".to_string(),
                    hits: 0,
                    owner_id: None,
                    created_at: Utc::now(),
                }))
            });

        let result = generator(repo).generate().await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn is_free_trusts_cached_entries() {
        let repo = MockRedirectRepository::new();
        let cache = Arc::new(MemoryCache::new(1000));
        let generator = AliasGenerator::new(Arc::new(repo), cache.clone());

        cache.insert("cachedone", CacheEntry::Missing).await;

        // The mock would panic on any store call.
        assert!(generator.is_free("cachedone").await.unwrap());
    }
}
