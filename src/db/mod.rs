//! Database Module
//!
//! The persistent store: the single source of truth the cache derives from.

mod store;

pub use store::Store;
