//! Configuration management
//!
//! Layered configuration (defaults, TOML file, environment) loaded with
//! Figment.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::{
    AppConfig, CacheConfig, LoggingConfig, RemoteConfig, RemoteProvider, WarmingConfig,
};
