//! Film import
//!
//! Pulls the film list from the upstream catalog and upserts it into the
//! store. Runs out of process, so a running server sees the changes once its
//! cached views expire.

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use crate::db::Store;

/// One film as published by the upstream catalog. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamFilm {
    pub title: String,
    pub release_date: NaiveDate,
    /// Canonical resource URL, e.g. `https://swapi.info/api/films/1`
    #[serde(default)]
    pub url: Option<String>,
}

impl UpstreamFilm {
    /// The upstream identifier: the last path segment of `url`, or the
    /// 1-based position in the listing when no usable url is present.
    pub fn external_id(&self, position: usize) -> String {
        self.url
            .as_deref()
            .and_then(|url| url.trim_end_matches('/').rsplit('/').next())
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| (position + 1).to_string())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub created: usize,
    pub updated: usize,
}

impl SyncReport {
    pub fn total(&self) -> usize {
        self.created + self.updated
    }
}

/// Downloads the upstream film list.
pub async fn fetch_films(client: &reqwest::Client, url: &str) -> reqwest::Result<Vec<UpstreamFilm>> {
    client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json::<Vec<UpstreamFilm>>()
        .await
}

/// Upserts every film, keyed by its upstream identifier.
pub async fn sync_films(store: &Store, films: &[UpstreamFilm]) -> Result<SyncReport, sqlx::Error> {
    let mut report = SyncReport::default();

    for (position, film) in films.iter().enumerate() {
        let external_id = film.external_id(position);
        let created = store
            .upsert_film(&external_id, &film.title, film.release_date)
            .await?;

        let action = if created {
            report.created += 1;
            "created"
        } else {
            report.updated += 1;
            "updated"
        };
        info!(external_id = %external_id, title = %film.title, action, "synced film");
    }

    Ok(report)
}
