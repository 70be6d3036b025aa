//! Remote store configuration types

use predcache_providers::remote::RemoteStoreConfig;
use serde::{Deserialize, Serialize};

/// Remote store providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteProvider {
    /// Distributed store (Redis)
    Redis,
    /// Process-local store
    Memory,
    /// No remote tier, memory only
    Null,
}

impl RemoteProvider {
    /// Registry name of the provider
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Redis => "redis",
            Self::Memory => "memory",
            Self::Null => "null",
        }
    }
}

/// Remote store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Remote store provider
    pub provider: RemoteProvider,

    /// Connection URL (for Redis)
    pub url: Option<String>,
}

impl RemoteConfig {
    /// Convert into the provider factory's configuration
    pub fn to_store_config(&self) -> RemoteStoreConfig {
        let config = RemoteStoreConfig::new(self.provider.as_str());
        match &self.url {
            Some(url) => config.with_uri(url.clone()),
            None => config,
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            provider: RemoteProvider::Redis,
            url: Some("redis://localhost:6379".to_string()),
        }
    }
}
