//! FIFO (First-In-First-Out) replacement policy.
//!
//! Evicts entries in the order they entered the cache. Neither reads nor
//! updates move an entry, so there is no promotion path.

use std::collections::VecDeque;
use std::sync::atomic::Ordering;

use log::{debug, info};

use crate::cache::{CacheEntry, CachePolicy, CacheStats, KvCache};
use crate::common::config::{check_key, check_value};
use crate::common::{Error, Result};
use crate::storage::KvStore;

/// A write-back cache with insertion-order eviction.
///
/// Entries live in a bounded ring (`VecDeque`, front = oldest). `flush`
/// writes back every dirty entry and then empties the cache, unlike the
/// other policies.
///
/// # Example
/// ```
/// use kvscache::{FifoCache, KvCache, MemoryStore};
///
/// let mut cache = FifoCache::new(MemoryStore::new(), 2).unwrap();
/// cache.set("a", "1").unwrap();
/// cache.set("b", "2").unwrap();
/// cache.get("a").unwrap(); // reads don't reorder
/// cache.set("c", "3").unwrap();
///
/// assert!(!cache.contains("a"));
/// ```
#[derive(Debug)]
pub struct FifoCache<S> {
    store: S,

    /// Resident entries in insertion order (front = next victim).
    queue: VecDeque<CacheEntry>,

    capacity: usize,

    stats: CacheStats,
}

impl<S: KvStore> FifoCache<S> {
    /// Create a FIFO cache with room for `capacity` entries.
    ///
    /// # Errors
    /// `Error::InvalidCapacity` if `capacity` is 0.
    pub fn new(store: S, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity(capacity));
        }

        info!("fifo cache created with capacity {}", capacity);

        Ok(Self {
            store,
            queue: VecDeque::with_capacity(capacity),
            capacity,
            stats: CacheStats::new(),
        })
    }

    /// Resident keys, oldest first.
    pub fn keys(&self) -> Vec<&str> {
        self.queue.iter().map(CacheEntry::key).collect()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Release the cache without flushing and hand back the store.
    pub fn into_store(self) -> S {
        self.store
    }

    fn find(&self, key: &str) -> Option<usize> {
        self.queue.iter().position(|entry| entry.key() == key)
    }

    /// Append a new entry at the tail, evicting the head when full.
    fn push(&mut self, key: &str, value: &str, dirty: bool) -> Result<()> {
        if self.queue.len() == self.capacity {
            if let Some(oldest) = self.queue.front_mut() {
                // A failed write-back leaves the head in place.
                oldest.write_back(&mut self.store, &self.stats)?;
                debug!("fifo evicting {:?}", oldest.key());
            }
            self.queue.pop_front();
            self.stats.evictions.fetch_add(1, Ordering::Relaxed);
        }

        self.queue.push_back(CacheEntry::new(key, value, dirty));
        Ok(())
    }
}

impl<S: KvStore> KvCache for FifoCache<S> {
    fn get(&mut self, key: &str) -> Result<String> {
        check_key(key)?;

        if let Some(idx) = self.find(key) {
            self.stats.get_hits.fetch_add(1, Ordering::Relaxed);
            return Ok(self.queue[idx].value().to_string());
        }

        self.stats.get_misses.fetch_add(1, Ordering::Relaxed);
        let value = self.store.get(key)?;
        self.push(key, &value, false)?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        check_key(key)?;
        check_value(value)?;

        if let Some(idx) = self.find(key) {
            self.queue[idx].update(value);
            self.stats.set_hits.fetch_add(1, Ordering::Relaxed);
            return Ok(());
        }

        self.stats.set_misses.fetch_add(1, Ordering::Relaxed);
        self.push(key, value, true)
    }

    /// Write back every dirty entry, then empty the cache.
    ///
    /// If a write-back fails the cache keeps all of its entries; those
    /// already written are clean, the rest are still dirty.
    fn flush(&mut self) -> Result<()> {
        for entry in &mut self.queue {
            entry.write_back(&mut self.store, &self.stats)?;
        }

        debug!("fifo flush dropping {} entries", self.queue.len());
        self.queue.clear();
        Ok(())
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn contains(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    fn is_dirty(&self, key: &str) -> Option<bool> {
        self.find(key).map(|idx| self.queue[idx].is_dirty())
    }

    fn stats(&self) -> &CacheStats {
        &self.stats
    }

    fn policy(&self) -> CachePolicy {
        CachePolicy::Fifo
    }
}
