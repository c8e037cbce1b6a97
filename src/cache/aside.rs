//! Cache-Aside Accessor
//!
//! Read-through wrapper around a compute function that queries the store.

use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::SharedCache;

// == Cache Aside ==
/// Serves values from the shared cache, falling back to `compute` on a miss.
///
/// Concurrent misses on the same key are not coalesced: each caller computes
/// independently and the last `set` wins. The cache lock is never held while
/// `compute` runs.
#[derive(Clone)]
pub struct CacheAside {
    cache: SharedCache,
}

impl CacheAside {
    pub fn new(cache: SharedCache) -> Self {
        Self { cache }
    }

    // == Fetch ==
    /// Returns the cached value for `key`, or computes, caches and returns it.
    ///
    /// A failed `compute` is returned unchanged and leaves the cache untouched.
    pub async fn fetch<T, E, F, Fut>(&self, key: &str, ttl: Duration, compute: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let cached = self.cache.write().await.get(key);

        if let Some(payload) = cached {
            match serde_json::from_value::<T>(payload) {
                Ok(value) => {
                    debug!(key, "cache hit");
                    return Ok(value);
                }
                Err(err) => {
                    warn!(key, error = %err, "discarding undecodable cache entry");
                    self.cache.write().await.delete(key);
                }
            }
        }

        debug!(key, "cache miss, computing from store");
        let value = compute().await?;

        match serde_json::to_value(&value) {
            Ok(payload) => self.cache.write().await.set(key, payload, ttl),
            Err(err) => warn!(key, error = %err, "value not cacheable, serving uncached"),
        }

        Ok(value)
    }
}
