//! Cache statistics tracking.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Statistics tracked by a cache instance.
///
/// Counters are per instance and purely observational: no cache decision
/// ever reads them. They are atomic so a [`SharedCache`](crate::SharedCache)
/// snapshot never sees a torn value; all operations use `Ordering::Relaxed`.
///
/// # Example
/// ```
/// use kvscache::CacheStats;
/// use std::sync::atomic::Ordering;
///
/// let stats = CacheStats::new();
/// stats.get_hits.fetch_add(1, Ordering::Relaxed);
/// assert_eq!(stats.snapshot().get_hits, 1);
/// ```
#[derive(Debug)]
pub struct CacheStats {
    /// `get` calls answered from the cache.
    pub get_hits: AtomicU64,

    /// `get` calls that had to consult the backing store.
    pub get_misses: AtomicU64,

    /// `set` calls that updated a resident entry.
    pub set_hits: AtomicU64,

    /// `set` calls that created a new entry.
    pub set_misses: AtomicU64,

    /// Entries removed to make room for another.
    pub evictions: AtomicU64,

    /// Dirty entries written to the backing store.
    pub write_backs: AtomicU64,
}

impl CacheStats {
    /// Create a new stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self {
            get_hits: AtomicU64::new(0),
            get_misses: AtomicU64::new(0),
            set_hits: AtomicU64::new(0),
            set_misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
            write_backs: AtomicU64::new(0),
        }
    }

    /// Fraction of `get` calls served from the cache (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        self.snapshot().hit_rate()
    }

    /// Get a non-atomic copy for display/logging.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            get_hits: self.get_hits.load(Ordering::Relaxed),
            get_misses: self.get_misses.load(Ordering::Relaxed),
            set_hits: self.set_hits.load(Ordering::Relaxed),
            set_misses: self.set_misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            write_backs: self.write_backs.load(Ordering::Relaxed),
        }
    }
}

impl Default for CacheStats {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time snapshot of cache statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub get_hits: u64,
    pub get_misses: u64,
    pub set_hits: u64,
    pub set_misses: u64,
    pub evictions: u64,
    pub write_backs: u64,
}

impl StatsSnapshot {
    /// Fraction of `get` calls served from the cache (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.get_hits + self.get_misses;
        if total == 0 {
            0.0
        } else {
            self.get_hits as f64 / total as f64
        }
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ get hits: {}, get misses: {}, set hits: {}, set misses: {}, \
             evictions: {}, write-backs: {}, hit_rate: {:.2}% }}",
            self.get_hits,
            self.get_misses,
            self.set_hits,
            self.set_misses,
            self.evictions,
            self.write_backs,
            self.hit_rate() * 100.0
        )
    }
}
