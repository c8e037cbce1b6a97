//! Cache Module
//!
//! In-memory cache-aside layer in front of the film store: entry storage with
//! TTL expiry, the read-through accessor, and write-path invalidation.

mod aside;
mod entry;
mod invalidate;
mod keys;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

use std::sync::Arc;

use tokio::sync::RwLock;

// Re-export public types
pub use aside::CacheAside;
pub use entry::CacheEntry;
pub use invalidate::Invalidator;
pub use keys::{film_key, CachePolicy, KeyClass, DEFAULT_TTL, FILMS_LIST_KEY};
pub use stats::CacheStats;
pub use store::CacheStore;

/// The one cache instance a process holds, shared by handlers and tasks.
pub type SharedCache = Arc<RwLock<CacheStore>>;

/// Creates an empty shared cache.
pub fn new_shared_cache() -> SharedCache {
    Arc::new(RwLock::new(CacheStore::new()))
}
