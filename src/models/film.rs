//! Domain records
//!
//! Rows owned by the store and the derived views handed to clients.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A film as imported from the upstream catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Film {
    pub id: i64,
    /// Identifier in the upstream catalog
    pub external_id: String,
    pub title: String,
    pub release_date: NaiveDate,
}

/// Read-optimized view of a film with its comment count at compute time.
///
/// This is the payload cached under the film listing and detail keys. It is a
/// snapshot and goes stale until invalidated or expired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FilmSummary {
    pub id: i64,
    pub title: String,
    pub release_date: NaiveDate,
    pub comment_count: i64,
}

/// A user comment, enriched with the title of the film it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: i64,
    #[serde(rename = "film")]
    pub film_id: i64,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub film_title: String,
}
