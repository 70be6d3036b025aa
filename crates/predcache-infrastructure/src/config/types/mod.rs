//! Configuration types

pub mod app;
pub mod cache;
pub mod logging;
pub mod remote;
pub mod warming;

pub use app::AppConfig;
pub use cache::CacheConfig;
pub use logging::LoggingConfig;
pub use remote::{RemoteConfig, RemoteProvider};
pub use warming::WarmingConfig;
