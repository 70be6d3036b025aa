//! Remote Store Implementations
//!
//! ## Available Stores
//!
//! | Store | Type | Description |
//! |-------|------|-------------|
//! | [`NullRemoteStore`] | Testing | Stores nothing, memory tier only |
//! | [`InMemoryRemoteStore`] | Local | Process-local map with TTLs |
//! | [`RedisRemoteStore`] | Distributed | Shared across instances |
//!
//! ## Store Selection Guide
//!
//! - **Development/Testing**: `memory` (or `null` to exercise the memory tier)
//! - **Single Instance**: `memory`
//! - **Multi Instance**: `redis`

#[cfg(feature = "remote-memory")]
pub mod memory;
pub mod null;
#[cfg(feature = "remote-redis")]
pub mod redis;

#[cfg(feature = "remote-memory")]
pub use memory::InMemoryRemoteStore;
pub use null::NullRemoteStore;
#[cfg(feature = "remote-redis")]
pub use redis::RedisRemoteStore;

use predcache_domain::error::{Error, Result};
use predcache_domain::ports::RemoteStore;
use std::sync::Arc;
use tracing::info;

/// Configuration for remote store creation
///
/// Stores use what they need and ignore the rest.
#[derive(Debug, Clone, Default)]
pub struct RemoteStoreConfig {
    /// Store name (e.g., "redis", "memory", "null")
    pub provider: String,
    /// Connection URI (for networked stores)
    pub uri: Option<String>,
}

impl RemoteStoreConfig {
    /// Create a new config with the given store name
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Set the URI
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }
}

/// Registry entry for remote stores
pub struct RemoteStoreEntry {
    /// Unique store name
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create a store instance
    pub factory: fn(&RemoteStoreConfig) -> Result<Arc<dyn RemoteStore>>,
}

#[cfg(feature = "remote-redis")]
fn redis_factory(config: &RemoteStoreConfig) -> Result<Arc<dyn RemoteStore>> {
    let uri = config
        .uri
        .as_deref()
        .unwrap_or(crate::constants::DEFAULT_REDIS_URL);
    Ok(Arc::new(RedisRemoteStore::new(uri)?))
}

#[cfg(feature = "remote-memory")]
fn memory_factory(_config: &RemoteStoreConfig) -> Result<Arc<dyn RemoteStore>> {
    Ok(Arc::new(InMemoryRemoteStore::new()))
}

fn null_factory(_config: &RemoteStoreConfig) -> Result<Arc<dyn RemoteStore>> {
    Ok(Arc::new(NullRemoteStore::new()))
}

/// Every remote store compiled into this build
pub fn registered_stores() -> Vec<RemoteStoreEntry> {
    let mut stores = Vec::with_capacity(3);
    #[cfg(feature = "remote-redis")]
    stores.push(RemoteStoreEntry {
        name: "redis",
        description: "Redis distributed store",
        factory: redis_factory,
    });
    #[cfg(feature = "remote-memory")]
    stores.push(RemoteStoreEntry {
        name: "memory",
        description: "Process-local store with TTLs",
        factory: memory_factory,
    });
    stores.push(RemoteStoreEntry {
        name: "null",
        description: "No-op store (memory tier only)",
        factory: null_factory,
    });
    stores
}

/// Create the remote store named by `config.provider`
///
/// # Returns
/// * `Ok(Arc<dyn RemoteStore>)` - Created store instance
/// * `Err(Error::Configuration)` - Unknown store name or invalid settings
pub fn create_remote_store(config: &RemoteStoreConfig) -> Result<Arc<dyn RemoteStore>> {
    let stores = registered_stores();
    let entry = stores
        .iter()
        .find(|entry| entry.name.eq_ignore_ascii_case(&config.provider))
        .ok_or_else(|| {
            let available: Vec<&str> = stores.iter().map(|e| e.name).collect();
            Error::config(format!(
                "Unknown remote store '{}'. Available stores: {available:?}",
                config.provider
            ))
        })?;
    info!(
        store = entry.name,
        description = entry.description,
        "Creating remote store"
    );
    (entry.factory)(config)
}
