//! Cache invalidation
//!
//! Pattern and tag invalidation over both tiers, plus a supervised registry
//! of delayed invalidations.
//!
//! Scheduled invalidations run as tracked tasks, each with a child of the
//! invalidator's cancellation token, so they can be cancelled one at a time,
//! drained before shutdown, or abandoned all at once.
//!
//! A registry entry is claimed exactly once: either by `cancel_scheduled` or
//! by its task when the delay elapses. Whoever removes it owns the outcome,
//! so a cancel that loses the race to a firing task reports `false`.

use crate::cache::manager::CacheManager;
use dashmap::DashMap;
use predcache_domain::value_objects::CacheKey;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

/// Handle of a scheduled invalidation
pub type ScheduleId = u64;

#[derive(Debug)]
struct ScheduledInvalidation {
    target: String,
    namespace: String,
    token: CancellationToken,
}

/// Pending invalidations with a hard bound on their number
///
/// A slot is reserved before an entry is inserted and released when the
/// entry is taken, so concurrent schedulers never exceed the bound.
#[derive(Debug)]
struct ScheduleRegistry {
    entries: DashMap<ScheduleId, ScheduledInvalidation>,
    reserved: AtomicUsize,
    capacity: usize,
}

impl ScheduleRegistry {
    fn new(capacity: usize) -> Self {
        Self {
            entries: DashMap::new(),
            reserved: AtomicUsize::new(0),
            capacity,
        }
    }

    fn try_reserve(&self) -> bool {
        self.reserved
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n < self.capacity).then_some(n + 1)
            })
            .is_ok()
    }

    fn release(&self) {
        self.reserved.fetch_sub(1, Ordering::AcqRel);
    }

    fn insert(&self, id: ScheduleId, entry: ScheduledInvalidation) {
        self.entries.insert(id, entry);
    }

    /// Remove an entry and free its slot; `None` if someone else took it
    fn take(&self, id: ScheduleId) -> Option<ScheduledInvalidation> {
        let (_, entry) = self.entries.remove(&id)?;
        self.release();
        Some(entry)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// A pending scheduled invalidation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingInvalidation {
    /// Handle returned by `schedule_invalidation`
    pub id: ScheduleId,
    /// Key or glob pattern to invalidate
    pub target: String,
    /// Namespace the target lives in
    pub namespace: String,
}

/// Pattern, tag and scheduled invalidation
pub struct CacheInvalidator {
    manager: Arc<CacheManager>,
    scheduled: Arc<ScheduleRegistry>,
    next_id: AtomicU64,
    cancel_token: CancellationToken,
    task_tracker: TaskTracker,
}

impl CacheInvalidator {
    /// Create an invalidator holding at most `max_scheduled` pending invalidations
    pub fn new(manager: Arc<CacheManager>, max_scheduled: usize) -> Self {
        Self {
            manager,
            scheduled: Arc::new(ScheduleRegistry::new(max_scheduled)),
            next_id: AtomicU64::new(1),
            cancel_token: CancellationToken::new(),
            task_tracker: TaskTracker::new(),
        }
    }

    /// Remove every key matching `pattern` inside `namespace`
    ///
    /// `pattern` is a glob over the raw key (`user:*`). Both tiers are purged
    /// in the same call; returns the number of remote keys removed.
    pub async fn invalidate_by_pattern(&self, pattern: &str, namespace: &str) -> u64 {
        let scoped = CacheKey::scoped_pattern(self.manager.app_id(), namespace, pattern);
        match self.manager.remove_matching(&scoped).await {
            Ok(removed) => {
                info!(pattern, namespace, removed, "Invalidated keys by pattern");
                removed
            }
            Err(e) => {
                warn!(pattern, namespace, operation = "invalidate_by_pattern", error = %e, "Pattern invalidation failed");
                0
            }
        }
    }

    /// Remove every key carrying any of `tags`
    ///
    /// A tag matches composed keys with the tag as an inner segment, so the
    /// namespace name works as a tag. A failing tag is logged and skipped.
    pub async fn invalidate_by_tags<S: AsRef<str>>(&self, tags: &[S]) -> u64 {
        let mut total = 0;
        for tag in tags {
            let tag = tag.as_ref();
            match self
                .manager
                .remove_matching(&CacheKey::tag_pattern(tag))
                .await
            {
                Ok(removed) => {
                    debug!(tag, removed, "Invalidated tag");
                    total += removed;
                }
                Err(e) => {
                    warn!(tag, operation = "invalidate_by_tags", error = %e, "Tag invalidation failed, continuing");
                }
            }
        }
        info!(tags = tags.len(), removed = total, "Invalidated keys by tags");
        total
    }

    /// Invalidate `target` after `delay`
    ///
    /// A target containing `*`, `?` or `[` is a pattern, anything else a
    /// single key. Returns `None` when the registry is full or the
    /// invalidator has been drained or shut down.
    pub fn schedule_invalidation(
        &self,
        target: &str,
        delay: Duration,
        namespace: &str,
    ) -> Option<ScheduleId> {
        if self.task_tracker.is_closed() {
            warn!(target = %target, namespace, "Invalidator closed, refusing scheduled invalidation");
            return None;
        }
        if !self.scheduled.try_reserve() {
            warn!(
                target = %target,
                namespace,
                limit = self.scheduled.capacity,
                "Scheduled invalidation limit reached"
            );
            return None;
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let token = self.cancel_token.child_token();
        self.scheduled.insert(
            id,
            ScheduledInvalidation {
                target: target.to_string(),
                namespace: namespace.to_string(),
                token: token.clone(),
            },
        );

        debug!(id, target = %target, namespace, delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX), "Scheduled invalidation");

        let manager = Arc::clone(&self.manager);
        let scheduled = Arc::clone(&self.scheduled);
        let target = target.to_string();
        let namespace = namespace.to_string();
        self.task_tracker.spawn(async move {
            tokio::select! {
                () = token.cancelled() => {
                    // Already taken when cancelled individually; still held on shutdown
                    scheduled.take(id);
                    debug!(id, target = %target, "Scheduled invalidation cancelled");
                }
                () = tokio::time::sleep(delay) => {
                    if scheduled.take(id).is_none() {
                        debug!(id, target = %target, "Scheduled invalidation cancelled before firing");
                        return;
                    }
                    let removed = if CacheKey::is_pattern(&target) {
                        let scoped =
                            CacheKey::scoped_pattern(manager.app_id(), &namespace, &target);
                        manager.remove_matching(&scoped).await.unwrap_or_else(|e| {
                            warn!(id, target = %target, error = %e, "Scheduled invalidation failed");
                            0
                        })
                    } else {
                        u64::from(manager.delete(&target, &namespace).await)
                    };
                    info!(id, target = %target, namespace = %namespace, removed, "Scheduled invalidation fired");
                }
            }
        });
        Some(id)
    }

    /// Cancel a pending scheduled invalidation
    ///
    /// Returns `false` once the invalidation has started firing, and for an
    /// id that was already cancelled or never existed.
    pub fn cancel_scheduled(&self, id: ScheduleId) -> bool {
        match self.scheduled.take(id) {
            Some(entry) => {
                entry.token.cancel();
                debug!(id, target = %entry.target, "Cancelled scheduled invalidation");
                true
            }
            None => false,
        }
    }

    /// Scheduled invalidations that have not fired yet, ordered by id
    pub fn pending_invalidations(&self) -> Vec<PendingInvalidation> {
        let mut pending: Vec<PendingInvalidation> = self
            .scheduled
            .entries
            .iter()
            .map(|entry| PendingInvalidation {
                id: *entry.key(),
                target: entry.value().target.clone(),
                namespace: entry.value().namespace.clone(),
            })
            .collect();
        pending.sort_by_key(|p| p.id);
        pending
    }

    /// Whether the invalidator still accepts scheduled invalidations
    pub fn is_accepting(&self) -> bool {
        !self.task_tracker.is_closed()
    }

    /// Stop accepting new schedules and wait for pending ones to fire
    ///
    /// Returns `true` if every pending invalidation ran before `timeout`.
    pub async fn drain(&self, timeout: Duration) -> bool {
        self.task_tracker.close();
        info!(
            pending = self.task_tracker.len(),
            "Draining scheduled invalidations"
        );
        self.wait_for_tasks(timeout).await
    }

    /// Stop accepting new schedules, cancel pending ones and wait for their tasks
    ///
    /// Returns `true` if every task exited before `timeout`.
    pub async fn shutdown(&self, timeout: Duration) -> bool {
        info!(
            pending = self.task_tracker.len(),
            "Shutting down cache invalidator"
        );
        self.cancel_token.cancel();
        self.task_tracker.close();
        self.wait_for_tasks(timeout).await
    }

    async fn wait_for_tasks(&self, timeout: Duration) -> bool {
        tokio::select! {
            () = self.task_tracker.wait() => true,
            () = tokio::time::sleep(timeout) => {
                warn!(
                    pending = self.task_tracker.len(),
                    "Timed out waiting for scheduled invalidations"
                );
                false
            }
        }
    }
}

impl std::fmt::Debug for CacheInvalidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheInvalidator")
            .field("pending", &self.scheduled.len())
            .field("max_scheduled", &self.scheduled.capacity)
            .field("accepting", &self.is_accepting())
            .finish_non_exhaustive()
    }
}
