//! Alias cache trait and entry types.

use crate::domain::entities::Redirect;
use async_trait::async_trait;

/// A cached resolution result for an alias.
///
/// `Missing` is an explicit negative entry: the alias was looked up in the
/// store and did not exist. Caching the absence avoids repeated store
/// round-trips for hot invalid aliases (scraper and bot probing).
#[derive(Debug, Clone, PartialEq)]
pub enum CacheEntry {
    Found(Redirect),
    Missing,
}

impl CacheEntry {
    /// Returns the cached redirect, if the entry is a positive one.
    pub fn into_redirect(self) -> Option<Redirect> {
        match self {
            CacheEntry::Found(redirect) => Some(redirect),
            CacheEntry::Missing => None,
        }
    }
}

/// Trait for caching alias resolution results.
///
/// Implementations must be thread-safe; the cache is shared by every
/// concurrent resolve and mutation call. Entries live until the owning
/// alias is mutated or deleted, or until the implementation's bounded
/// eviction policy discards them; there is no time-based expiry.
///
/// Every mutation path in the directory overwrites or invalidates the
/// corresponding key only after the store write succeeds, so the cache
/// never reflects state the store rejected.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::MemoryCache`] - bounded in-process cache
/// - [`crate::infrastructure::cache::NullCache`] - no-op implementation for disabled caching
#[async_trait]
pub trait AliasCache: Send + Sync {
    /// Retrieves the cached entry for an alias, if any.
    async fn get(&self, alias: &str) -> Option<CacheEntry>;

    /// Stores or overwrites the entry for an alias.
    async fn insert(&self, alias: &str, entry: CacheEntry);

    /// Removes the entry for an alias.
    ///
    /// Called from every mutation path that deletes the alias, so a
    /// subsequent create of a previously-missed alias is immediately
    /// visible.
    async fn invalidate(&self, alias: &str);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn into_redirect_on_found() {
        let redirect = Redirect {
            id: 1,
            alias: "abc12345".to_string(),
            target: "https://example.com/".to_string(),
            hits: 3,
            owner_id: None,
            created_at: Utc::now(),
        };

        let entry = CacheEntry::Found(redirect.clone());
        assert_eq!(entry.into_redirect(), Some(redirect));
    }

    #[test]
    fn into_redirect_on_missing() {
        assert_eq!(CacheEntry::Missing.into_redirect(), None);
    }
}
