//! CLOCK (second chance) replacement policy.
//!
//! Entries sit in a fixed ring of slots. Every access sets the slot's
//! reference bit. When the ring is full, the hand sweeps forward clearing
//! set bits until it reaches a slot whose bit is already clear; that slot
//! is the victim.

use std::sync::atomic::Ordering;

use log::{debug, info};

use crate::cache::{CacheEntry, CachePolicy, CacheStats, KvCache};
use crate::common::config::{check_key, check_value};
use crate::common::{Error, Result, SlotId};
use crate::storage::KvStore;

/// One slot of the clock ring.
#[derive(Debug)]
struct ClockSlot {
    entry: CacheEntry,
    referenced: bool,
}

/// A write-back cache with second-chance eviction.
///
/// # Architecture
/// ```text
///              hand
///               │
///               ▼
///   ┌────────┬────────┬────────┬────────┐
///   │ a  R=1 │ b  R=0 │ c  R=1 │ d  R=0 │   slots: Vec<ClockSlot>
///   └────────┴────────┴────────┴────────┘
///        sweep: clear R=1 and advance, stop at first R=0
/// ```
///
/// # Filling
/// While the ring has free slots, new entries go to slot `len` and the hand
/// stays at slot 0. The first sweep therefore starts at the oldest slot,
/// whether the ring was filled by `set` or by store fills after `get` misses.
///
/// # Example
/// ```
/// use kvscache::{ClockCache, KvCache, MemoryStore};
///
/// let mut cache = ClockCache::new(MemoryStore::new(), 1).unwrap();
/// cache.set("a", "1").unwrap();
/// cache.set("b", "2").unwrap(); // sweeps past a once, then evicts it
///
/// assert!(!cache.contains("a"));
/// assert_eq!(cache.store().peek("a"), Some("1"));
/// ```
#[derive(Debug)]
pub struct ClockCache<S> {
    /// Backing store for misses and write-backs.
    store: S,

    /// Occupied slots; grows to `capacity` and never shrinks.
    slots: Vec<ClockSlot>,

    /// Next slot the sweep examines.
    hand: SlotId,

    /// Number of slots (immutable after construction).
    capacity: usize,

    stats: CacheStats,
}

impl<S: KvStore> ClockCache<S> {
    /// Create a CLOCK cache with room for `capacity` entries.
    ///
    /// # Errors
    /// `Error::InvalidCapacity` if `capacity` is 0.
    pub fn new(store: S, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity(capacity));
        }

        info!("clock cache created with {} slots", capacity);

        Ok(Self {
            store,
            slots: Vec::with_capacity(capacity),
            hand: SlotId::default(),
            capacity,
            stats: CacheStats::new(),
        })
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    /// Current hand position.
    pub fn hand(&self) -> SlotId {
        self.hand
    }

    /// Reference bit of `key`, or `None` if it isn't resident.
    pub fn is_referenced(&self, key: &str) -> Option<bool> {
        self.find(key).map(|slot| self.slots[slot.0].referenced)
    }

    /// Resident keys in slot order.
    pub fn keys(&self) -> Vec<&str> {
        self.slots.iter().map(|slot| slot.entry.key()).collect()
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

    // ========================================================================
    // Internal
    // ========================================================================

    fn find(&self, key: &str) -> Option<SlotId> {
        self.slots
            .iter()
            .position(|slot| slot.entry.key() == key)
            .map(SlotId::new)
    }

    /// Run the second-chance sweep and return the victim slot.
    ///
    /// Only called on a full ring. Terminates within one revolution plus one
    /// step, since a full revolution clears every bit.
    fn sweep(&mut self) -> SlotId {
        loop {
            let slot = &mut self.slots[self.hand.0];
            if !slot.referenced {
                return self.hand;
            }
            slot.referenced = false;
            self.hand = self.hand.next(self.capacity);
        }
    }

    /// Place a new entry, evicting a victim when the ring is full.
    fn install(&mut self, key: &str, value: &str, dirty: bool) -> Result<()> {
        if self.slots.len() < self.capacity {
            self.slots.push(ClockSlot {
                entry: CacheEntry::new(key, value, dirty),
                referenced: true,
            });
            return Ok(());
        }

        let victim = self.sweep();
        let slot = &mut self.slots[victim.0];

        // A failed write-back leaves the victim resident and dirty.
        slot.entry.write_back(&mut self.store, &self.stats)?;

        debug!("clock evicting {:?} from {}", slot.entry.key(), victim);
        slot.entry.replace(key, value, dirty);
        slot.referenced = true;

        self.hand = victim.next(self.capacity);
        self.stats.evictions.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

impl<S: KvStore> KvCache for ClockCache<S> {
    fn get(&mut self, key: &str) -> Result<String> {
        check_key(key)?;

        if let Some(slot) = self.find(key) {
            let slot = &mut self.slots[slot.0];
            slot.referenced = true;
            self.stats.get_hits.fetch_add(1, Ordering::Relaxed);
            return Ok(slot.entry.value().to_string());
        }

        self.stats.get_misses.fetch_add(1, Ordering::Relaxed);
        let value = self.store.get(key)?;
        self.install(key, &value, false)?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        check_key(key)?;
        check_value(value)?;

        if let Some(slot) = self.find(key) {
            let slot = &mut self.slots[slot.0];
            slot.entry.update(value);
            slot.referenced = true;
            self.stats.set_hits.fetch_add(1, Ordering::Relaxed);
            return Ok(());
        }

        self.stats.set_misses.fetch_add(1, Ordering::Relaxed);
        self.install(key, value, true)
    }

    fn flush(&mut self) -> Result<()> {
        for slot in &mut self.slots {
            slot.entry.write_back(&mut self.store, &self.stats)?;
        }
        Ok(())
    }

    fn len(&self) -> usize {
        self.slots.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn contains(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    fn is_dirty(&self, key: &str) -> Option<bool> {
        self.find(key).map(|slot| self.slots[slot.0].entry.is_dirty())
    }

    fn stats(&self) -> &CacheStats {
        &self.stats
    }

    fn policy(&self) -> CachePolicy {
        CachePolicy::Clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::test_util::FlakyStore;
    use crate::cache::StatsSnapshot;
    use crate::storage::MemoryStore;

    fn cache(capacity: usize) -> ClockCache<MemoryStore> {
        ClockCache::new(MemoryStore::new(), capacity).unwrap()
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result = ClockCache::new(MemoryStore::new(), 0);
        assert!(matches!(result, Err(Error::InvalidCapacity(0))));
    }

    #[test]
    fn test_set_then_get_hits_cache() {
        let mut cache = cache(2);
        cache.set("a", "1").unwrap();

        assert_eq!(cache.get("a").unwrap(), "1");
        assert_eq!(cache.store().read_count(), 0);
        assert_eq!(cache.is_dirty("a"), Some(true));
    }

    #[test]
    fn test_single_slot_wraps_to_itself() {
        let mut cache = cache(1);
        cache.set("a", "1").unwrap();
        cache.set("b", "2").unwrap();

        assert_eq!(cache.keys(), vec!["b"]);
        assert_eq!(cache.hand(), SlotId::new(0));
        assert_eq!(cache.store().peek("a"), Some("1"));
        assert_eq!(cache.stats().snapshot().evictions, 1);
    }

    #[test]
    fn test_full_sweep_evicts_first_slot() {
        let mut cache = cache(3);
        for key in ["a", "b", "c"] {
            cache.set(key, key).unwrap();
        }
        assert_eq!(cache.hand(), SlotId::new(0));

        // All bits set: one revolution clears them, then slot 0 is the victim
        cache.set("d", "d").unwrap();

        assert_eq!(cache.keys(), vec!["d", "b", "c"]);
        assert_eq!(cache.hand(), SlotId::new(1));
        assert_eq!(cache.is_referenced("b"), Some(false));
        assert_eq!(cache.is_referenced("c"), Some(false));
        assert_eq!(cache.is_referenced("d"), Some(true));
    }

    #[test]
    fn test_referenced_entry_gets_second_chance() {
        let mut cache = cache(3);
        for key in ["a", "b", "c"] {
            cache.set(key, key).unwrap();
        }
        cache.set("d", "d").unwrap(); // evicts a, hand -> 1

        // b is oldest under the hand, but a read gives it another pass
        cache.get("b").unwrap();
        cache.set("e", "e").unwrap();

        assert!(cache.contains("b"));
        assert!(!cache.contains("c"));
        assert_eq!(cache.keys(), vec!["d", "b", "e"]);
        assert_eq!(cache.is_referenced("b"), Some(false));
    }

    #[test]
    fn test_update_in_place() {
        let mut cache = cache(2);
        cache.set("a", "1").unwrap();
        cache.set("b", "2").unwrap();
        cache.set("a", "3").unwrap();

        assert_eq!(cache.keys(), vec!["a", "b"]);
        assert_eq!(cache.get("a").unwrap(), "3");
        assert_eq!(cache.stats().snapshot().set_hits, 1);
        assert_eq!(cache.stats().snapshot().set_misses, 2);
    }

    #[test]
    fn test_get_miss_fills_clean() {
        let store = MemoryStore::with_entries([("x", "10")]);
        let mut cache = ClockCache::new(store, 2).unwrap();

        assert_eq!(cache.get("x").unwrap(), "10");
        assert_eq!(cache.is_dirty("x"), Some(false));
        assert_eq!(cache.is_referenced("x"), Some(true));
        assert_eq!(cache.store().read_count(), 1);

        // Second read is a hit
        cache.get("x").unwrap();
        assert_eq!(cache.store().read_count(), 1);
    }

    #[test]
    fn test_get_miss_and_not_found() {
        let mut cache = cache(2);
        let err = cache.get("ghost").unwrap_err();

        assert!(err.is_not_found());
        assert!(cache.is_empty());
        assert_eq!(cache.stats().snapshot().get_misses, 1);
    }

    #[test]
    fn test_fill_by_get_then_set_keeps_both() {
        let store = MemoryStore::with_entries([("x", "10")]);
        let mut cache = ClockCache::new(store, 3).unwrap();

        cache.get("x").unwrap();
        cache.set("y", "20").unwrap();
        cache.set("z", "30").unwrap();

        assert_eq!(cache.keys(), vec!["x", "y", "z"]);
        assert_eq!(cache.hand(), SlotId::new(0));
    }

    #[test]
    fn test_get_miss_when_full_evicts_by_sweep() {
        let store = MemoryStore::with_entries([("x", "10")]);
        let mut cache = ClockCache::new(store, 2).unwrap();
        cache.set("a", "1").unwrap();
        cache.set("b", "2").unwrap();

        assert_eq!(cache.get("x").unwrap(), "10");

        assert_eq!(cache.keys(), vec!["x", "b"]);
        assert_eq!(cache.is_dirty("x"), Some(false));
        assert_eq!(cache.store().peek("a"), Some("1"));
    }

    #[test]
    fn test_clean_victim_not_written() {
        let store = MemoryStore::with_entries([("x", "10"), ("y", "20")]);
        let mut cache = ClockCache::new(store, 1).unwrap();

        cache.get("x").unwrap();
        cache.get("y").unwrap();

        assert_eq!(cache.store().write_count(), 0);
        assert_eq!(cache.stats().snapshot().evictions, 1);
    }

    #[test]
    fn test_flush_keeps_entries_and_bits() {
        let mut cache = cache(3);
        cache.set("a", "1").unwrap();
        cache.set("b", "2").unwrap();

        cache.flush().unwrap();

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.is_dirty("a"), Some(false));
        assert_eq!(cache.is_dirty("b"), Some(false));
        assert_eq!(cache.is_referenced("a"), Some(true));
        assert_eq!(cache.store().peek("b"), Some("2"));

        // Nothing left to write
        cache.flush().unwrap();
        assert_eq!(cache.store().write_count(), 2);
    }

    #[test]
    fn test_get_does_not_clear_dirty() {
        let mut cache = cache(2);
        cache.set("a", "1").unwrap();
        cache.get("a").unwrap();
        assert_eq!(cache.is_dirty("a"), Some(true));
    }

    #[test]
    fn test_failed_write_back_retains_victim() {
        let mut cache = ClockCache::new(FlakyStore::new(), 1).unwrap();
        cache.set("a", "1").unwrap();

        cache.store_mut().fail_writes = true;
        let err = cache.set("b", "2").unwrap_err();

        assert!(matches!(err, Error::WriteBack { ref key, .. } if key == "a"));
        assert_eq!(cache.keys(), vec!["a"]);
        assert_eq!(cache.is_dirty("a"), Some(true));
        assert_eq!(cache.stats().snapshot().evictions, 0);

        // Retry once the store recovers
        cache.store_mut().fail_writes = false;
        cache.set("b", "2").unwrap();
        assert_eq!(cache.keys(), vec!["b"]);
        assert_eq!(cache.store().inner.peek("a"), Some("1"));
    }

    #[test]
    fn test_oversized_input_rejected() {
        let mut cache = cache(2);
        let long_key = "k".repeat(crate::common::config::MAX_KEY_LEN + 1);
        let long_value = "v".repeat(crate::common::config::MAX_VALUE_LEN + 1);

        assert!(matches!(
            cache.set(&long_key, "v"),
            Err(Error::KeyTooLong { .. })
        ));
        assert!(matches!(
            cache.set("k", &long_value),
            Err(Error::ValueTooLong { .. })
        ));
        assert!(matches!(cache.get(&long_key), Err(Error::KeyTooLong { .. })));
        assert!(cache.is_empty());
        assert_eq!(cache.stats().snapshot(), StatsSnapshot::default());
    }
}
