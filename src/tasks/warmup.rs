//! Startup Populator
//!
//! Fills the cache once at process start so the first listing request is a
//! hit. Invoked explicitly by the entry point after the store is ready.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::{info, warn};

use crate::cache::{film_key, CachePolicy, KeyClass, SharedCache, FILMS_LIST_KEY};
use crate::db::Store;
use crate::models::FilmSummary;

/// What a populator run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarmupOutcome {
    /// Listing and per-film entries installed
    Populated { films: usize },
    /// Store has no films; nothing cached
    Empty,
    /// Store query failed; the cache fills lazily instead
    Failed,
    /// Store did not answer within the timeout
    TimedOut,
    /// A previous run already happened in this process
    AlreadyRan,
}

pub struct StartupPopulator {
    store: Store,
    cache: SharedCache,
    policy: CachePolicy,
    timeout: Duration,
    ran: AtomicBool,
}

impl StartupPopulator {
    pub fn new(store: Store, cache: SharedCache, policy: CachePolicy, timeout: Duration) -> Self {
        Self {
            store,
            cache,
            policy,
            timeout,
            ran: AtomicBool::new(false),
        }
    }

    /// Populates the cache. Never fails: problems are logged and the service
    /// falls back to filling on miss.
    pub async fn run(&self) -> WarmupOutcome {
        if self.ran.swap(true, Ordering::SeqCst) {
            return WarmupOutcome::AlreadyRan;
        }

        info!("populating cache on startup");
        let films = match tokio::time::timeout(self.timeout, self.store.film_summaries()).await {
            Ok(Ok(films)) => films,
            Ok(Err(err)) => {
                warn!(error = %err, "could not populate cache on startup");
                return WarmupOutcome::Failed;
            }
            Err(_) => {
                warn!(timeout_secs = self.timeout.as_secs_f64(), "startup population timed out");
                return WarmupOutcome::TimedOut;
            }
        };

        if films.is_empty() {
            warn!("no films in store, skipping cache population (run sync_films)");
            return WarmupOutcome::Empty;
        }

        match self.install(&films).await {
            Ok(()) => {
                info!(films = films.len(), "cache populated");
                WarmupOutcome::Populated { films: films.len() }
            }
            Err(err) => {
                warn!(error = %err, "could not serialize films for cache");
                WarmupOutcome::Failed
            }
        }
    }

    /// Installs exactly what the miss path would have cached.
    async fn install(&self, films: &[FilmSummary]) -> Result<(), serde_json::Error> {
        let list = serde_json::to_value(films)?;
        let details = films
            .iter()
            .map(|film| serde_json::to_value(film).map(|value| (film_key(film.id), value)))
            .collect::<Result<Vec<_>, serde_json::Error>>()?;

        let mut cache = self.cache.write().await;
        cache.set(FILMS_LIST_KEY, list, self.policy.ttl_for(KeyClass::FilmList));
        for (key, value) in details {
            cache.set(key, value, self.policy.ttl_for(KeyClass::FilmDetail));
        }
        Ok(())
    }
}
