//! Cache Entry Module
//!
//! Defines a single cached snapshot together with its expiry deadline.

use std::time::{Duration, Instant};

use serde_json::Value;

// == Cache Entry ==
/// A cached value and the instant after which it must no longer be served.
///
/// Entries are never mutated in place. Replacing a key installs a whole new
/// entry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Snapshot of the derived view
    pub value: Value,
    /// When the entry was installed
    pub created_at: Instant,
    /// Deadline; the entry is expired once `now >= expires_at`
    pub expires_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry that expires `ttl` from now.
    pub fn new(value: Value, ttl: Duration) -> Self {
        let now = Instant::now();
        Self {
            value,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry whose deadline equals the current instant
    /// is already expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Same as [`is_expired`](Self::is_expired) against an explicit clock reading.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    // == Time To Live ==
    /// Remaining lifetime, saturating at zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}
