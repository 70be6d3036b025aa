// Allow collapsible_if for complex conditional logic
#![allow(clippy::collapsible_if)]

//! # predcache - Provider Implementations
//!
//! Implementations of the ports defined in `predcache-domain`.
//!
//! ## Provider Categories
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Remote store | `RemoteStore` | Redis, InMemory, Null |
//! | Warm source | `WarmDataSource` | Fixture |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! predcache-providers = { version = "0.1", default-features = false, features = ["remote-memory"] }
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use predcache_providers::remote::{create_remote_store, RemoteStoreConfig};
//!
//! let store = create_remote_store(&RemoteStoreConfig::new("redis").with_uri("redis://localhost:6379"))?;
//! ```

// Re-export predcache-domain types commonly used with providers
pub use predcache_domain::error::{Error, Result};
pub use predcache_domain::ports::{RemoteStore, WarmDataSource};

/// Provider-specific constants
pub mod constants;

/// Remote store implementations
///
/// Implements `RemoteStore` for the shared cache tier.
pub mod remote;

/// Warm data source implementations
pub mod warming;
