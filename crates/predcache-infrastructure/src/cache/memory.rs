//! In-process memory tier
//!
//! A bounded LRU map of composed keys to serialized JSON with per-entry
//! expiry. Expiry is lazy: an entry past its deadline is treated as absent
//! and removed by the read that notices it.

use glob::Pattern;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct MemoryEntry {
    payload: Arc<str>,
    expires_at: Instant,
}

impl MemoryEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Outcome of a memory-tier read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryLookup {
    /// Live entry; the serialized value
    Hit(Arc<str>),
    /// The entry existed but had expired and was removed
    Expired,
    /// No entry for the key
    Absent,
}

/// Bounded memory tier
///
/// The mutex is held for one map operation at a time and never across an
/// `.await`.
#[derive(Debug)]
pub struct MemoryTier {
    entries: Mutex<LruCache<String, MemoryEntry>>,
    ttl_cap: Duration,
}

impl MemoryTier {
    /// Create a tier holding at most `capacity` entries, each living at most `ttl_cap`
    pub fn new(capacity: usize, ttl_cap: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl_cap,
        }
    }

    /// Read a key, removing it if expired
    pub fn get(&self, key: &str) -> MemoryLookup {
        let now = Instant::now();
        let mut entries = self.entries.lock();
        let live = entries
            .get(key)
            .map(|entry| (!entry.is_expired(now)).then(|| Arc::clone(&entry.payload)));
        match live {
            None => MemoryLookup::Absent,
            Some(Some(payload)) => MemoryLookup::Hit(payload),
            Some(None) => {
                entries.pop(key);
                MemoryLookup::Expired
            }
        }
    }

    /// Whether a live entry exists, without touching recency
    pub fn contains(&self, key: &str) -> bool {
        let now = Instant::now();
        self.entries
            .lock()
            .peek(key)
            .is_some_and(|entry| !entry.is_expired(now))
    }

    /// Store `payload` for `min(ttl, ttl_cap)`
    ///
    /// Returns the key evicted to make room, if any.
    pub fn insert(&self, key: &str, payload: Arc<str>, ttl: Duration) -> Option<String> {
        let entry = MemoryEntry {
            payload,
            expires_at: Instant::now() + ttl.min(self.ttl_cap),
        };
        let displaced = self.entries.lock().push(key.to_string(), entry);
        displaced
            .map(|(displaced_key, _)| displaced_key)
            .filter(|displaced_key| displaced_key != key)
    }

    /// Remove a key; returns whether an entry was present
    pub fn remove(&self, key: &str) -> bool {
        self.entries.lock().pop(key).is_some()
    }

    /// Remove every key matching `pattern`; returns the number removed
    pub fn purge_matching(&self, pattern: &Pattern) -> usize {
        let mut entries = self.entries.lock();
        let doomed: Vec<String> = entries
            .iter()
            .filter(|(key, _)| pattern.matches(key))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &doomed {
            entries.pop(key);
        }
        doomed.len()
    }

    /// Number of entries held, including expired ones not yet removed
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the tier holds no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.entries.lock().cap().get()
    }

    /// TTL ceiling applied to every entry
    pub fn ttl_cap(&self) -> Duration {
        self.ttl_cap
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}
