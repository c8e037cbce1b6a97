//! Background Tasks Module
//!
//! # Tasks
//! - Startup population: fills the cache once before serving traffic
//! - Expired entry sweep: removes expired cache entries at configured intervals

mod cleanup;
mod warmup;

pub use cleanup::spawn_cleanup_task;
pub use warmup::{StartupPopulator, WarmupOutcome};
