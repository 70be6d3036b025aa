//! # Infrastructure Layer
//!
//! The two-tier cache itself plus the cross-cutting concerns around it.
//!
//! ### Cache
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | Cache manager, invalidation, warming, memoization |
//! | [`bootstrap`] | Composition root wiring the cache components |
//!
//! ### Configuration
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment-layered TOML and environment configuration |
//! | [`constants`] | Defaults and tunables |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |

pub mod bootstrap;
pub mod cache;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;
pub mod utils;

pub use bootstrap::{CacheSystem, init_cache_system};
pub use error_ext::ErrorContext;
pub use utils::TimedOperation;
