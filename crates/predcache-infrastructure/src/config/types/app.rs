//! Application configuration root

use super::{CacheConfig, LoggingConfig, RemoteConfig, WarmingConfig};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Cache manager configuration
    pub cache: CacheConfig,

    /// Remote store configuration
    pub remote: RemoteConfig,

    /// Cache warming configuration
    pub warming: WarmingConfig,
}
