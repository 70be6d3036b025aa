//! Memoization of async functions through the cache
//!
//! ```ignore
//! let predict = cached(
//!     Arc::clone(&manager),
//!     "predict",
//!     CachedOptions::new().with_ttl_secs(600).with_namespace("predictions"),
//!     |match_id: String| async move { model.predict(&match_id).await },
//! );
//!
//! // First call runs the model, later calls within 10 minutes read the cache
//! let prediction = predict.call("42".to_string()).await;
//! ```
//!
//! The default key is the function name followed by the arguments' JSON
//! form split into parts: tuple or sequence elements positionally, struct or
//! map fields as `field=value` sorted by field, a scalar as itself. Parts
//! are joined with `:`, so `("42", 3)` under `predict` becomes `predict:42:3`.

use crate::cache::manager::CacheManager;
use crate::constants::MEMOIZE_KEY_SEPARATOR;
use predcache_domain::constants::DEFAULT_NAMESPACE;
use predcache_domain::error::Result;
use predcache_domain::value_objects::CacheEntryConfig;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Storage options of a memoized function
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CachedOptions {
    /// TTL of memoized results; the manager default when unset
    pub ttl: Option<Duration>,
    /// Namespace of memoized results; `"default"` when unset
    pub namespace: Option<String>,
}

impl CachedOptions {
    /// Options using every default
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the TTL
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Set the TTL in seconds
    pub fn with_ttl_secs(self, secs: u64) -> Self {
        self.with_ttl(Duration::from_secs(secs))
    }

    /// Set the namespace
    pub fn with_namespace<S: Into<String>>(mut self, namespace: S) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    fn namespace(&self) -> &str {
        self.namespace.as_deref().unwrap_or(DEFAULT_NAMESPACE)
    }

    fn entry_config(&self) -> CacheEntryConfig {
        CacheEntryConfig {
            ttl: self.ttl,
            namespace: self.namespace.clone(),
        }
    }
}

type KeyFn<A> = Box<dyn Fn(&A) -> String + Send + Sync>;

/// An async function whose results are cached
pub struct Memoized<A, F> {
    manager: Arc<CacheManager>,
    name: String,
    options: CachedOptions,
    func: F,
    key_fn: Option<KeyFn<A>>,
}

/// Wrap `func` so its results are read from and written to the cache
pub fn cached<A, F, Fut>(
    manager: Arc<CacheManager>,
    name: impl Into<String>,
    options: CachedOptions,
    func: F,
) -> Memoized<A, F>
where
    F: Fn(A) -> Fut,
    Fut: Future,
{
    Memoized {
        manager,
        name: name.into(),
        options,
        func,
        key_fn: None,
    }
}

impl<A, F> Memoized<A, F> {
    /// Replace the default key derivation
    pub fn with_key_fn<K>(mut self, key_fn: K) -> Self
    where
        K: Fn(&A) -> String + Send + Sync + 'static,
    {
        self.key_fn = Some(Box::new(key_fn));
        self
    }

    /// Function name used as key prefix
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Storage options
    pub fn options(&self) -> &CachedOptions {
        &self.options
    }
}

impl<A, F, Fut> Memoized<A, F>
where
    A: Serialize,
    F: Fn(A) -> Fut,
    Fut: Future,
    Fut::Output: Serialize + DeserializeOwned,
{
    /// Cache key for `args`
    ///
    /// Fails only when the arguments cannot be serialized.
    pub fn cache_key(&self, args: &A) -> Result<String> {
        match &self.key_fn {
            Some(key_fn) => Ok(key_fn(args)),
            None => default_key(&self.name, args),
        }
    }

    /// Return the cached result for `args`, or run the function and cache it
    ///
    /// Cache failures never surface: the function still runs and its result
    /// is returned.
    pub async fn call(&self, args: A) -> Fut::Output {
        let namespace = self.options.namespace();
        let key = match self.cache_key(&args) {
            Ok(key) => Some(key),
            Err(e) => {
                warn!(function = %self.name, error = %e, "Cannot derive cache key, calling through");
                None
            }
        };

        if let Some(key) = &key
            && let Some(hit) = self.manager.get::<Fut::Output>(key, namespace).await
        {
            debug!(function = %self.name, key = %key, "Memoized result served from cache");
            return hit;
        }

        let result = (self.func)(args).await;

        if let Some(key) = &key {
            self.manager
                .set(key, &result, self.options.entry_config())
                .await;
        }
        result
    }
}

impl<A, F> std::fmt::Debug for Memoized<A, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memoized")
            .field("name", &self.name)
            .field("options", &self.options)
            .field("custom_key", &self.key_fn.is_some())
            .finish_non_exhaustive()
    }
}

/// Default memoization key: `name` and the argument parts joined by `:`
pub fn default_key<A: Serialize + ?Sized>(name: &str, args: &A) -> Result<String> {
    let parts = argument_parts(serde_json::to_value(args)?);
    let mut key = name.to_string();
    for part in parts {
        key.push_str(MEMOIZE_KEY_SEPARATOR);
        key.push_str(&part);
    }
    Ok(key)
}

fn argument_parts(value: Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items.into_iter().map(render_part).collect(),
        Value::Object(fields) => {
            let mut fields: Vec<(String, Value)> = fields.into_iter().collect();
            fields.sort_by(|(a, _), (b, _)| a.cmp(b));
            fields
                .into_iter()
                .map(|(field, value)| format!("{field}={}", render_part(value)))
                .collect()
        }
        scalar => vec![render_part(scalar)],
    }
}

fn render_part(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}
