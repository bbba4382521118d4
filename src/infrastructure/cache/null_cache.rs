//! No-op cache implementation for testing or disabled caching.

use super::service::{AliasCache, CacheEntry};
use async_trait::async_trait;
use tracing::debug;

/// A cache implementation that does nothing.
///
/// All operations succeed immediately without storing or retrieving data,
/// so every lookup goes straight to the store.
///
/// # Use Cases
///
/// - Deployments where caching is explicitly disabled (`CACHE_CAPACITY=0`)
/// - Testing scenarios where caching should be bypassed
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AliasCache for NullCache {
    async fn get(&self, _alias: &str) -> Option<CacheEntry> {
        None
    }

    async fn insert(&self, _alias: &str, _entry: CacheEntry) {}

    async fn invalidate(&self, _alias: &str) {}
}
