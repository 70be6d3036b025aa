//! Domain layer constants
//!
//! Constants that define the cache key scheme. Tunables (TTLs, capacities,
//! timeouts) are infrastructure concerns and live in
//! `predcache_infrastructure::constants`.

/// Namespace used when the caller does not choose one
pub const DEFAULT_NAMESPACE: &str = "default";

/// Separator between the segments of a composed cache key
pub const KEY_SEPARATOR: char = ':';

/// Characters that turn a key into a glob pattern
pub const GLOB_METACHARACTERS: [char; 3] = ['*', '?', '['];
