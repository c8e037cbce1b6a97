//! Configuration Module
//!
//! Loads server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::CachePolicy;

/// Default location of the upstream film catalog.
pub const DEFAULT_SWAPI_URL: &str = "https://swapi.info/api/films/";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Store connection string
    pub database_url: String,
    /// Store pool size
    pub database_max_connections: u32,
    /// TTL in seconds for the film listing
    pub films_list_ttl: u64,
    /// TTL in seconds for a single film
    pub film_detail_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Expired-entry sweep interval in seconds
    pub cleanup_interval: u64,
    /// Upper bound in seconds on startup cache population
    pub warmup_timeout: u64,
    /// Upstream catalog used by the import job
    pub swapi_url: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DATABASE_URL` (default: `sqlite://films.db`)
    /// - `DATABASE_MAX_CONNECTIONS` (default: 5)
    /// - `FILMS_LIST_TTL` (default: 600)
    /// - `FILM_DETAIL_TTL` (default: 600)
    /// - `SERVER_PORT` (default: 8000)
    /// - `CLEANUP_INTERVAL` (default: 60)
    /// - `WARMUP_TIMEOUT` (default: 5)
    /// - `SWAPI_URL` (default: `https://swapi.info/api/films/`)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            database_max_connections: env_or("DATABASE_MAX_CONNECTIONS", defaults.database_max_connections),
            films_list_ttl: env_or("FILMS_LIST_TTL", defaults.films_list_ttl),
            film_detail_ttl: env_or("FILM_DETAIL_TTL", defaults.film_detail_ttl),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
            warmup_timeout: env_or("WARMUP_TIMEOUT", defaults.warmup_timeout),
            swapi_url: env::var("SWAPI_URL").unwrap_or(defaults.swapi_url),
        }
    }

    /// TTLs per cache key class.
    pub fn cache_policy(&self) -> CachePolicy {
        CachePolicy {
            film_list_ttl: Duration::from_secs(self.films_list_ttl),
            film_detail_ttl: Duration::from_secs(self.film_detail_ttl),
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://films.db".to_string(),
            database_max_connections: 5,
            films_list_ttl: 600,
            film_detail_ttl: 600,
            server_port: 8000,
            cleanup_interval: 60,
            warmup_timeout: 5,
            swapi_url: DEFAULT_SWAPI_URL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.database_url, "sqlite://films.db");
        assert_eq!(config.films_list_ttl, 600);
        assert_eq!(config.film_detail_ttl, 600);
        assert_eq!(config.server_port, 8000);
        assert_eq!(config.cleanup_interval, 60);
    }

    #[test]
    fn test_config_from_env() {
        env::remove_var("DATABASE_URL");
        env::remove_var("DATABASE_MAX_CONNECTIONS");
        env::remove_var("SERVER_PORT");
        env::remove_var("CLEANUP_INTERVAL");
        env::remove_var("WARMUP_TIMEOUT");
        env::remove_var("SWAPI_URL");
        env::set_var("FILMS_LIST_TTL", "30");
        env::set_var("FILM_DETAIL_TTL", "not-a-number");

        let config = Config::from_env();
        assert_eq!(config.database_url, "sqlite://films.db");
        assert_eq!(config.server_port, 8000);
        assert_eq!(config.films_list_ttl, 30);
        assert_eq!(config.film_detail_ttl, 600);

        env::remove_var("FILMS_LIST_TTL");
        env::remove_var("FILM_DETAIL_TTL");
    }

    #[test]
    fn test_cache_policy_from_config() {
        let config = Config {
            films_list_ttl: 60,
            film_detail_ttl: 120,
            ..Config::default()
        };
        let policy = config.cache_policy();
        assert_eq!(policy.film_list_ttl, Duration::from_secs(60));
        assert_eq!(policy.film_detail_ttl, Duration::from_secs(120));
    }
}
