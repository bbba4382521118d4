//! Caching layer for fast alias resolution.
//!
//! Provides the [`AliasCache`] trait with two implementations:
//! - [`MemoryCache`] - bounded in-process cache (moka)
//! - [`NullCache`] - no-op implementation for testing/disabled caching

mod memory_cache;
mod null_cache;
mod service;

pub use memory_cache::MemoryCache;
pub use null_cache::NullCache;
pub use service::{AliasCache, CacheEntry};
