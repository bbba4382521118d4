//! Bounded in-process cache implementation.

use super::service::{AliasCache, CacheEntry};
use async_trait::async_trait;
use moka::future::Cache;
use tracing::debug;

/// In-process alias cache backed by `moka`.
///
/// Size-bounded (entries beyond `capacity` are evicted by moka's TinyLFU
/// policy) with no time-based expiry: an entry stays valid until the
/// owning alias is mutated, deleted, or evicted under capacity pressure.
pub struct MemoryCache {
    entries: Cache<String, CacheEntry>,
}

impl MemoryCache {
    /// Creates a cache bounded to `capacity` entries.
    pub fn new(capacity: u64) -> Self {
        debug!("Using in-process alias cache (capacity: {})", capacity);
        Self {
            entries: Cache::builder().max_capacity(capacity).build(),
        }
    }

    /// Number of entries currently cached (approximate under concurrency).
    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }
}

#[async_trait]
impl AliasCache for MemoryCache {
    async fn get(&self, alias: &str) -> Option<CacheEntry> {
        self.entries.get(alias).await
    }

    async fn insert(&self, alias: &str, entry: CacheEntry) {
        self.entries.insert(alias.to_owned(), entry).await;
    }

    async fn invalidate(&self, alias: &str) {
        self.entries.invalidate(alias).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Redirect;
    use chrono::Utc;

    fn redirect(alias: &str, hits: i64) -> Redirect {
        Redirect {
            id: 1,
            alias: alias.to_string(),
            target: "https://example.com/".to_string(),
            hits,
            owner_id: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn get_returns_inserted_entry() {
        let cache = MemoryCache::new(100);

        cache
            .insert("abc12345", CacheEntry::Found(redirect("abc12345", 0)))
            .await;

        let entry = cache.get("abc12345").await.unwrap();
        assert_eq!(entry.into_redirect().unwrap().alias, "abc12345");
    }

    #[tokio::test]
    async fn get_cold_key_returns_none() {
        let cache = MemoryCache::new(100);
        assert!(cache.get("nope").await.is_none());
    }

    #[tokio::test]
    async fn missing_marker_round_trips() {
        let cache = MemoryCache::new(100);

        cache.insert("ghost", CacheEntry::Missing).await;

        assert_eq!(cache.get("ghost").await, Some(CacheEntry::Missing));
    }

    #[tokio::test]
    async fn insert_overwrites_previous_entry() {
        let cache = MemoryCache::new(100);

        cache.insert("abc12345", CacheEntry::Missing).await;
        cache
            .insert("abc12345", CacheEntry::Found(redirect("abc12345", 7)))
            .await;

        let entry = cache.get("abc12345").await.unwrap();
        assert_eq!(entry.into_redirect().unwrap().hits, 7);
    }

    #[tokio::test]
    async fn invalidate_removes_entry() {
        let cache = MemoryCache::new(100);

        cache
            .insert("abc12345", CacheEntry::Found(redirect("abc12345", 0)))
            .await;
        cache.invalidate("abc12345").await;

        assert!(cache.get("abc12345").await.is_none());
    }
}
