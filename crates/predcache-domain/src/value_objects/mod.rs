//! Value objects
//!
//! Immutable data carried between the cache layers.

pub mod cache;
pub mod health;

pub use cache::{CacheEntryConfig, CacheKey, CacheStats};
pub use health::{HealthReport, HealthStatus, RemoteInfo};
