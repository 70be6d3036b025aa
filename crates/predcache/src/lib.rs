//! # predcache
//!
//! A two-tier cache for a match prediction backend: a bounded in-process
//! memory tier in front of a shared Redis store, with namespaced keys,
//! per-entry TTLs, pattern and tag invalidation, scheduled invalidation,
//! proactive warming and memoization of async functions.
//!
//! The cache is fail-open. No cache operation returns an error to its
//! caller; failures are logged, counted in [`CacheStats::errors`] and
//! reported by the health check.
//!
//! ## Example
//!
//! ```ignore
//! use predcache::{CacheEntryConfig, ConfigLoader, init_cache_system, init_logging};
//!
//! let config = ConfigLoader::new().load()?;
//! init_logging(config.logging.clone())?;
//! let system = init_cache_system(config)?;
//!
//! let cache = system.manager();
//! cache
//!     .set("pred:42", &prediction, CacheEntryConfig::in_namespace("predictions"))
//!     .await;
//! let hit: Option<Prediction> = cache.get("pred:42", "predictions").await;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Error type, ports (remote store, warm source) and value objects
//! - `providers` - Redis, in-memory and null remote stores; fixture warm source
//! - `infrastructure` - Cache manager, invalidator, warmer, memoization,
//!   configuration and logging

/// Domain layer - core types and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use predcache_domain::*;
}

/// Provider implementations - remote stores and warm sources
///
/// Re-exports from the providers crate for convenience
pub mod providers {
    pub use predcache_providers::*;
}

/// Infrastructure layer - the cache, configuration and logging
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use predcache_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

// Re-export the cache components and their wiring
pub use infrastructure::bootstrap::{CacheSystem, init_cache_system};
pub use infrastructure::cache::{
    CacheInvalidator, CacheManager, CacheWarmer, CachedOptions, Memoized, ScheduleId,
    WarmReport, cached,
};
pub use infrastructure::config::{AppConfig, ConfigBuilder, ConfigLoader, RemoteProvider};
pub use infrastructure::logging::init_logging;
