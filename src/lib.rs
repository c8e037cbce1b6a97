//! Film Catalog - films and comments served through a cache-aside layer
//!
//! Reads are answered from a TTL-bounded in-memory cache that is populated at
//! startup, filled on miss, and cleared whenever a comment is written.

pub mod api;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod sync;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use db::Store;
pub use tasks::{spawn_cleanup_task, StartupPopulator};
