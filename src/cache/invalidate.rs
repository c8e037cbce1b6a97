//! Invalidator
//!
//! Drops cache entries made stale by a committed write. Callers must only
//! invalidate after the store write has committed.

use tracing::info;

use crate::cache::SharedCache;

#[derive(Clone)]
pub struct Invalidator {
    cache: SharedCache,
}

impl Invalidator {
    pub fn new(cache: SharedCache) -> Self {
        Self { cache }
    }

    /// Clears every entry.
    ///
    /// Comment counts feed every film listing and detail view, so a new
    /// comment stales all of them.
    pub async fn invalidate_all(&self) -> usize {
        let removed = self.cache.write().await.clear();
        info!(removed, "invalidated all cache entries");
        removed
    }

    /// Drops a single key. Idempotent.
    pub async fn invalidate(&self, key: &str) -> bool {
        let removed = self.cache.write().await.delete(key);
        if removed {
            info!(key, "invalidated cache entry");
        }
        removed
    }
}
