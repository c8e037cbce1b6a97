//! Cache key derivation and per-class TTL policy.

use std::time::Duration;

/// Key for the aggregate film listing.
pub const FILMS_LIST_KEY: &str = "films_list";

/// Default lifetime of every cached view.
pub const DEFAULT_TTL: Duration = Duration::from_secs(10 * 60);

/// Key for a single film's summary. Distinct per film id.
pub fn film_key(film_id: i64) -> String {
    format!("film_{film_id}")
}

/// The logical read shapes that are cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyClass {
    /// `GET /films/`
    FilmList,
    /// `GET /films/{id}/`
    FilmDetail,
}

/// TTLs per key class. Callers never pick a TTL per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    pub film_list_ttl: Duration,
    pub film_detail_ttl: Duration,
}

impl CachePolicy {
    /// Same TTL for every key class.
    pub fn uniform(ttl: Duration) -> Self {
        Self {
            film_list_ttl: ttl,
            film_detail_ttl: ttl,
        }
    }

    pub fn ttl_for(&self, class: KeyClass) -> Duration {
        match class {
            KeyClass::FilmList => self.film_list_ttl,
            KeyClass::FilmDetail => self.film_detail_ttl,
        }
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::uniform(DEFAULT_TTL)
    }
}
