//! Two-tier cache
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`manager`] | Cache-aside reads, write-through writes, health |
//! | [`invalidation`] | Pattern, tag and scheduled invalidation |
//! | [`warming`] | Proactive filling of likely-hot keys |
//! | [`memoize`] | Caching wrapper for async functions |
//! | [`memory`] | Bounded in-process tier |
//! | [`stats`] | Operation counters |

pub mod invalidation;
pub mod manager;
pub mod memoize;
pub mod memory;
pub mod stats;
pub mod warming;

pub use invalidation::{CacheInvalidator, PendingInvalidation, ScheduleId};
pub use manager::CacheManager;
pub use memoize::{CachedOptions, Memoized, cached};
pub use memory::{MemoryLookup, MemoryTier};
pub use stats::StatsRecorder;
pub use warming::{CacheWarmer, WarmReport};
