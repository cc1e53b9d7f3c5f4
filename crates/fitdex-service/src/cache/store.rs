//! Query-result cache store.

use super::clock::{Clock, SystemClock};
use fitdex_config::{CacheConfig, ValidityPolicy};
use fitdex_core::Exercise;
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::trace;

/// Default time-to-live for cached query results.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Storage for query results keyed by query shape.
///
/// Operations never fail. A missing entry reads as an empty sequence, which
/// is why callers must ask [`is_valid`](Self::is_valid) before trusting
/// [`get`](Self::get).
pub trait ExerciseCacheStore: Send + Sync {
    /// True iff an entry exists for `key` and is fresh under the policy.
    fn is_valid(&self, key: &str) -> bool;

    /// Stored sequence for `key`, or empty if absent.
    fn get(&self, key: &str) -> Vec<Exercise>;

    /// Stores `records` under `key` and stamps it with the current time.
    fn put(&self, key: &str, records: Vec<Exercise>);

    /// Returns the stored sequence only if it is fresh.
    ///
    /// Equivalent to `is_valid` followed by `get`, but implementations may
    /// answer both under one lock.
    fn get_fresh(&self, key: &str) -> Option<Vec<Exercise>> {
        if self.is_valid(key) {
            Some(self.get(key))
        } else {
            None
        }
    }

    /// Number of stored entries, stale ones included.
    fn len(&self) -> usize;

    /// Returns true if nothing is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every entry and resets the last-fetch timestamp.
    fn clear(&self);

    /// Point-in-time statistics.
    fn stats(&self) -> CacheStats;
}

/// Snapshot of cache state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Stored entries, stale ones included.
    pub entries: usize,
    /// Entries that would currently be served without a remote call.
    pub fresh_entries: usize,
    /// Configured time-to-live in seconds.
    pub ttl_secs: u64,
    /// Freshness policy.
    pub policy: ValidityPolicy,
    /// Entry cap, if any.
    pub max_entries: Option<usize>,
    /// Milliseconds since the most recent `put`, if any.
    pub last_fetch_age_ms: Option<u64>,
}

#[derive(Debug)]
struct Entry {
    records: Vec<Exercise>,
    stored_at: Instant,
    seq: u64,
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, Entry>,
    last_fetch: Option<Instant>,
    next_seq: u64,
}

/// Process-local cache guarded by a read-write lock.
///
/// The lock is never held across an `.await`; every operation is
/// synchronous.
#[derive(Debug)]
pub struct InMemoryExerciseCache {
    inner: RwLock<Inner>,
    ttl: Duration,
    policy: ValidityPolicy,
    max_entries: Option<usize>,
    clock: Arc<dyn Clock>,
}

impl InMemoryExerciseCache {
    /// Creates a per-entry cache with the given TTL and the system clock.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            ttl,
            policy: ValidityPolicy::PerEntry,
            max_entries: None,
            clock: Arc::new(SystemClock),
        }
    }

    /// Creates a cache from configuration.
    #[must_use]
    pub fn from_config(config: &CacheConfig) -> Self {
        let cache = Self::new(config.ttl()).with_policy(config.validity);
        match config.max_entries {
            Some(max) => cache.with_max_entries(max),
            None => cache,
        }
    }

    /// Sets the freshness policy.
    #[must_use]
    pub fn with_policy(mut self, policy: ValidityPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Caps the number of stored entries; the oldest is evicted first.
    #[must_use]
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = Some(max_entries.max(1));
        self
    }

    /// Replaces the time source.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Configured time-to-live.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Configured freshness policy.
    #[must_use]
    pub const fn policy(&self) -> ValidityPolicy {
        self.policy
    }

    fn is_fresh(&self, inner: &Inner, entry: &Entry, now: Instant) -> bool {
        let stamp = match self.policy {
            ValidityPolicy::PerEntry => Some(entry.stored_at),
            ValidityPolicy::GlobalTimestamp => inner.last_fetch,
        };
        stamp.is_some_and(|stamp| now.saturating_duration_since(stamp) < self.ttl)
    }

    fn evict_oldest(inner: &mut Inner) {
        let oldest = inner
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.seq)
            .map(|(key, _)| key.clone());
        if let Some(key) = oldest {
            trace!(key = %key, "Evicting oldest cache entry");
            inner.entries.remove(&key);
        }
    }
}

impl Default for InMemoryExerciseCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl ExerciseCacheStore for InMemoryExerciseCache {
    fn is_valid(&self, key: &str) -> bool {
        let now = self.clock.now();
        let inner = self.inner.read();
        inner
            .entries
            .get(key)
            .is_some_and(|entry| self.is_fresh(&inner, entry, now))
    }

    fn get(&self, key: &str) -> Vec<Exercise> {
        self.inner
            .read()
            .entries
            .get(key)
            .map(|entry| entry.records.clone())
            .unwrap_or_default()
    }

    fn get_fresh(&self, key: &str) -> Option<Vec<Exercise>> {
        let now = self.clock.now();
        let inner = self.inner.read();
        inner
            .entries
            .get(key)
            .filter(|entry| self.is_fresh(&inner, entry, now))
            .map(|entry| entry.records.clone())
    }

    fn put(&self, key: &str, records: Vec<Exercise>) {
        let now = self.clock.now();
        let mut inner = self.inner.write();

        if let Some(max) = self.max_entries {
            if !inner.entries.contains_key(key) && inner.entries.len() >= max {
                Self::evict_oldest(&mut inner);
            }
        }

        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.last_fetch = Some(now);
        inner.entries.insert(
            key.to_string(),
            Entry {
                records,
                stored_at: now,
                seq,
            },
        );
    }

    fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    fn clear(&self) {
        let mut inner = self.inner.write();
        inner.entries.clear();
        inner.last_fetch = None;
    }

    fn stats(&self) -> CacheStats {
        let now = self.clock.now();
        let inner = self.inner.read();
        let fresh_entries = inner
            .entries
            .values()
            .filter(|entry| self.is_fresh(&inner, entry, now))
            .count();

        CacheStats {
            entries: inner.entries.len(),
            fresh_entries,
            ttl_secs: self.ttl.as_secs(),
            policy: self.policy,
            max_entries: self.max_entries,
            last_fetch_age_ms: inner
                .last_fetch
                .map(|at| u64::try_from(now.saturating_duration_since(at).as_millis()).unwrap_or(u64::MAX)),
        }
    }
}
