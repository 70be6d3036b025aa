//! # predcache Domain Layer
//!
//! Core types and ports for the two-tier prediction cache.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Domain error type and `Result` alias |
//! | [`constants`] | Key scheme constants shared by every layer |
//! | [`ports`] | Traits implemented by providers (remote store, warm source) |
//! | [`value_objects`] | Cache keys, statistics, entry config, health report |
//!
//! This crate performs no I/O. Remote stores live in `predcache-providers`,
//! the cache orchestration in `predcache-infrastructure`.

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::{RemoteStore, WarmDataSource};
pub use value_objects::{
    CacheEntryConfig, CacheKey, CacheStats, HealthReport, HealthStatus, RemoteInfo,
};
