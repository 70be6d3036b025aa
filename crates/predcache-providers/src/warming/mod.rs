//! Warm data sources
//!
//! Implements `WarmDataSource` for the cache warmer.

pub mod fixture;

pub use fixture::FixtureWarmSource;
