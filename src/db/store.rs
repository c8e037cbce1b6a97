//! Film Store
//!
//! SQLite-backed source of truth for films and comments.

use std::str::FromStr;

use chrono::{NaiveDate, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::models::{Comment, Film, FilmSummary};

const SCHEMA: [&str; 3] = [
    r#"CREATE TABLE IF NOT EXISTS films (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        external_id TEXT NOT NULL UNIQUE,
        title TEXT NOT NULL,
        release_date TEXT NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS comments (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        film_id INTEGER NOT NULL REFERENCES films(id) ON DELETE CASCADE,
        comment TEXT NOT NULL CHECK (length(CAST(comment AS BLOB)) > 0),
        created_at TEXT NOT NULL
    )"#,
    "CREATE INDEX IF NOT EXISTS idx_comments_film_created ON comments (film_id, created_at)",
];

/// Handle to the store. Cheap to clone; clones share one pool.
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Opens (creating if missing) the database at `url` and applies the schema.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.migrate().await?;
        info!(url, "store ready");
        Ok(store)
    }

    /// A private in-memory database.
    ///
    /// Pinned to one connection that never idles out, since every SQLite
    /// memory connection is its own database.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> Result<(), sqlx::Error> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Round-trips a trivial query.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Closes the pool. Every later call fails with `PoolClosed`.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    // == Films ==

    /// All films with their current comment counts, oldest release first.
    pub async fn film_summaries(&self) -> Result<Vec<FilmSummary>, sqlx::Error> {
        sqlx::query_as::<_, FilmSummary>(
            r#"SELECT f.id, f.title, f.release_date, COUNT(c.id) AS comment_count
               FROM films f
               LEFT JOIN comments c ON c.film_id = f.id
               GROUP BY f.id, f.title, f.release_date
               ORDER BY f.release_date, f.id"#,
        )
        .fetch_all(&self.pool)
        .await
    }

    pub async fn film_summary(&self, film_id: i64) -> Result<Option<FilmSummary>, sqlx::Error> {
        sqlx::query_as::<_, FilmSummary>(
            r#"SELECT f.id, f.title, f.release_date, COUNT(c.id) AS comment_count
               FROM films f
               LEFT JOIN comments c ON c.film_id = f.id
               WHERE f.id = ?
               GROUP BY f.id, f.title, f.release_date"#,
        )
        .bind(film_id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn find_film(&self, film_id: i64) -> Result<Option<Film>, sqlx::Error> {
        sqlx::query_as::<_, Film>(
            "SELECT id, external_id, title, release_date FROM films WHERE id = ?",
        )
        .bind(film_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Inserts or refreshes a film keyed by its upstream id.
    ///
    /// Returns `true` when a new row was created.
    pub async fn upsert_film(
        &self,
        external_id: &str,
        title: &str,
        release_date: NaiveDate,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM films WHERE external_id = ?")
            .bind(external_id)
            .fetch_optional(&mut *tx)
            .await?;

        match existing {
            Some(id) => {
                sqlx::query("UPDATE films SET title = ?, release_date = ? WHERE id = ?")
                    .bind(title)
                    .bind(release_date)
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
            }
            None => {
                sqlx::query("INSERT INTO films (external_id, title, release_date) VALUES (?, ?, ?)")
                    .bind(external_id)
                    .bind(title)
                    .bind(release_date)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;
        Ok(existing.is_none())
    }

    // == Comments ==

    /// Comments for a film in ascending creation order.
    pub async fn comments_for_film(&self, film_id: i64) -> Result<Vec<Comment>, sqlx::Error> {
        sqlx::query_as::<_, Comment>(
            r#"SELECT c.id, c.film_id, c.comment, c.created_at, f.title AS film_title
               FROM comments c
               JOIN films f ON f.id = c.film_id
               WHERE c.film_id = ?
               ORDER BY c.created_at, c.id"#,
        )
        .bind(film_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Persists a comment. Returns `None` if the film does not exist.
    ///
    /// The returned record is only produced after the transaction commits.
    pub async fn create_comment(
        &self,
        film_id: i64,
        text: &str,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let film_title: Option<String> = sqlx::query_scalar("SELECT title FROM films WHERE id = ?")
            .bind(film_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(film_title) = film_title else {
            return Ok(None);
        };

        let created_at = Utc::now();
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO comments (film_id, comment, created_at) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(film_id)
        .bind(text)
        .bind(created_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(Comment {
            id,
            film_id,
            comment: text.to_string(),
            created_at,
            film_title,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn seeded() -> Store {
        let store = Store::in_memory().await.unwrap();
        store.upsert_film("4", "A New Hope", date(1977, 5, 25)).await.unwrap();
        store.upsert_film("5", "The Empire Strikes Back", date(1980, 5, 17)).await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_summaries_ordered_by_release_with_counts() {
        let store = seeded().await;
        store.create_comment(2, "Best one").await.unwrap();

        let films = store.film_summaries().await.unwrap();

        assert_eq!(films.len(), 2);
        assert_eq!(films[0].title, "A New Hope");
        assert_eq!(films[0].comment_count, 0);
        assert_eq!(films[1].title, "The Empire Strikes Back");
        assert_eq!(films[1].comment_count, 1);
    }

    #[tokio::test]
    async fn test_film_summary_missing() {
        let store = seeded().await;
        assert!(store.film_summary(99).await.unwrap().is_none());
        assert!(store.find_film(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_updates_existing() {
        let store = seeded().await;

        let created = store.upsert_film("4", "Star Wars", date(1977, 5, 25)).await.unwrap();

        assert!(!created);
        let film = store.find_film(1).await.unwrap().unwrap();
        assert_eq!(film.title, "Star Wars");
        assert_eq!(film.external_id, "4");
    }

    #[tokio::test]
    async fn test_create_comment_for_missing_film() {
        let store = seeded().await;
        assert!(store.create_comment(42, "hello").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_comments_in_creation_order() {
        let store = seeded().await;
        for text in ["first", "second", "third"] {
            store.create_comment(1, text).await.unwrap().unwrap();
        }

        let comments = store.comments_for_film(1).await.unwrap();
        let texts: Vec<&str> = comments.iter().map(|c| c.comment.as_str()).collect();

        assert_eq!(texts, ["first", "second", "third"]);
        assert!(comments.iter().all(|c| c.film_title == "A New Hope"));
        assert!(comments.windows(2).all(|w| w[0].created_at <= w[1].created_at));
    }

    #[tokio::test]
    async fn test_closed_store_fails() {
        let store = seeded().await;
        store.close().await;

        assert!(store.ping().await.is_err());
        assert!(store.film_summaries().await.is_err());
    }
}
