//! Result cache: an LRU cache with per-entry TTL, keyed by a deterministic
//! fingerprint of an external operation's identity.
//!
//! Backs the external command runner (`crate::external`) so repeated
//! diagnostics/git invocations for the same `(operation, args, cwd, branch)`
//! tuple within a session don't re-spawn a subprocess. Guarded by a single
//! `parking_lot::Mutex` — Get/Set are O(1) amortized and always consistent.

mod key;

pub use key::generate_cache_key;

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::constants::{DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL};

struct CacheEntry<T> {
    value: T,
    op_type: String,
    expires_at: Instant,
    last_accessed: u64,
}

struct Inner<T> {
    entries: HashMap<String, CacheEntry<T>>,
    clock: u64,
}

/// Cache statistics snapshot, for diagnostics/observability.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CacheStats {
    pub size: usize,
    pub size_limit: usize,
    pub utilization: f64,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

/// An LRU cache, bounded at construction, with an independent TTL per entry.
///
/// Invariant: `size() <= capacity` after every `set`. A `set` that would
/// exceed capacity evicts the least-recently-accessed entry first.
pub struct ResultCache<T> {
    inner: Mutex<Inner<T>>,
    capacity: usize,
    default_ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl<T: Clone> ResultCache<T> {
    pub fn new(capacity: usize) -> Self {
        Self::with_ttl(capacity, DEFAULT_CACHE_TTL)
    }

    pub fn with_ttl(capacity: usize, default_ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                clock: 0,
            }),
            capacity: capacity.max(1),
            default_ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// Look up `key`. An expired entry is treated as a miss and removed
    /// eagerly rather than waiting for `clean_expired`.
    pub fn get(&self, key: &str) -> Option<T> {
        let mut inner = self.inner.lock();
        inner.clock += 1;
        let clock = inner.clock;

        let hit = match inner.entries.get_mut(key) {
            Some(entry) if entry.expires_at > Instant::now() => {
                entry.last_accessed = clock;
                Some(entry.value.clone())
            }
            Some(_) => {
                inner.entries.remove(key);
                None
            }
            None => None,
        };

        if hit.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        hit
    }

    /// Insert or overwrite `key`. Overwriting an existing key never grows
    /// the cache's size. `ttl` defaults to the cache's configured TTL.
    pub fn set(&self, key: impl Into<String>, op_type: impl Into<String>, value: T, ttl: Option<Duration>) {
        let key = key.into();
        let mut inner = self.inner.lock();
        inner.clock += 1;
        let clock = inner.clock;
        let expires_at = Instant::now() + ttl.unwrap_or(self.default_ttl);

        let is_new_key = !inner.entries.contains_key(&key);
        inner.entries.insert(
            key,
            CacheEntry {
                value,
                op_type: op_type.into(),
                expires_at,
                last_accessed: clock,
            },
        );

        if is_new_key && inner.entries.len() > self.capacity {
            if let Some(lru_key) = inner
                .entries
                .iter()
                .min_by_key(|(_, e)| e.last_accessed)
                .map(|(k, _)| k.clone())
            {
                inner.entries.remove(&lru_key);
                self.evictions.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Remove every entry recorded under `op_type`. Returns the number of
    /// entries removed.
    pub fn clear(&self, op_type: &str) -> usize {
        let mut inner = self.inner.lock();
        let before = inner.entries.len();
        inner.entries.retain(|_, e| e.op_type != op_type);
        before - inner.entries.len()
    }

    pub fn clear_all(&self) {
        self.inner.lock().entries.clear();
    }

    pub fn size(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn stats(&self) -> CacheStats {
        let size = self.size();
        CacheStats {
            size,
            size_limit: self.capacity,
            utilization: size as f64 / self.capacity as f64,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }

    /// Sweep and remove every entry past its TTL, independent of access.
    /// Returns the number of entries removed. Non-blocking for any other
    /// concurrent cache operation beyond the brief lock hold.
    pub fn clean_expired(&self) -> usize {
        let mut inner = self.inner.lock();
        let now = Instant::now();
        let before = inner.entries.len();
        inner.entries.retain(|_, e| e.expires_at > now);
        before - inner.entries.len()
    }
}

impl<T: Clone> Default for ResultCache<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
