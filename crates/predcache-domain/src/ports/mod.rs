//! Domain ports
//!
//! Interfaces implemented in `predcache-providers` and consumed by
//! `predcache-infrastructure`.

pub mod remote_store;
pub mod warm_source;

pub use remote_store::{RemoteStore, TTL_MISSING_KEY, TTL_NO_EXPIRY};
pub use warm_source::WarmDataSource;
