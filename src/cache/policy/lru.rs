//! LRU (Least Recently Used) replacement policy.
//!
//! Nodes live in an arena and are linked by [`SlotId`] from most to least
//! recently used. A key index gives O(1) lookup; promotion, insertion at the
//! front and removal of the tail are O(1) as well.

use std::collections::HashMap;
use std::sync::atomic::Ordering;

use log::{debug, info};

use crate::cache::{CacheEntry, CachePolicy, CacheStats, KvCache};
use crate::common::config::{check_key, check_value};
use crate::common::{Error, Result, SlotId};
use crate::storage::KvStore;

/// An arena node: an entry plus its recency links.
#[derive(Debug)]
struct Node {
    entry: CacheEntry,
    /// Towards the most recently used end.
    prev: Option<SlotId>,
    /// Towards the least recently used end.
    next: Option<SlotId>,
}

/// A write-back cache with least-recently-used eviction.
///
/// # Architecture
/// ```text
///   index: HashMap<String, SlotId>
///        │
///        ▼
///   head (MRU)                                  tail (LRU)
///      [n2] ──next──▶ [n0] ──next──▶ [n3] ──next──▶ [n1]
///           ◀──prev──      ◀──prev──      ◀──prev──
///   nodes: Vec<Node>, slots reused in place after eviction
/// ```
///
/// Every `get` hit and every `set` promotes the entry to the head.
///
/// # Example
/// ```
/// use kvscache::{KvCache, LruCache, MemoryStore};
///
/// let mut cache = LruCache::new(MemoryStore::new(), 2).unwrap();
/// cache.set("a", "1").unwrap();
/// cache.set("b", "2").unwrap();
/// cache.get("a").unwrap();
/// cache.set("c", "3").unwrap();
///
/// assert_eq!(cache.keys_by_recency(), vec!["c", "a"]);
/// ```
#[derive(Debug)]
pub struct LruCache<S> {
    store: S,

    /// Node arena; grows to `capacity` and never shrinks.
    nodes: Vec<Node>,

    /// Maps resident keys to their node.
    index: HashMap<String, SlotId>,

    /// Most recently used node.
    head: Option<SlotId>,

    /// Least recently used node (next victim).
    tail: Option<SlotId>,

    capacity: usize,

    stats: CacheStats,
}

impl<S: KvStore> LruCache<S> {
    /// Create an LRU cache with room for `capacity` entries.
    ///
    /// # Errors
    /// `Error::InvalidCapacity` if `capacity` is 0.
    pub fn new(store: S, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity(capacity));
        }

        info!("lru cache created with capacity {}", capacity);

        Ok(Self {
            store,
            nodes: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            head: None,
            tail: None,
            capacity,
            stats: CacheStats::new(),
        })
    }

    /// Resident keys from most to least recently used.
    pub fn keys_by_recency(&self) -> Vec<&str> {
        let mut keys = Vec::with_capacity(self.index.len());
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let node = &self.nodes[id.0];
            keys.push(node.entry.key());
            cursor = node.next;
        }
        keys
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
    // Internal: recency list
    // ========================================================================

    /// Unlink `id` from the list, fixing up head and tail.
    fn detach(&mut self, id: SlotId) {
        let (prev, next) = {
            let node = &self.nodes[id.0];
            (node.prev, node.next)
        };

        match prev {
            Some(p) => self.nodes[p.0].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.nodes[n.0].prev = prev,
            None => self.tail = prev,
        }

        let node = &mut self.nodes[id.0];
        node.prev = None;
        node.next = None;
    }

    /// Link a detached `id` in at the head.
    fn push_front(&mut self, id: SlotId) {
        let old_head = self.head;
        {
            let node = &mut self.nodes[id.0];
            node.prev = None;
            node.next = old_head;
        }

        match old_head {
            Some(h) => self.nodes[h.0].prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }

    fn promote(&mut self, id: SlotId) {
        if self.head == Some(id) {
            return;
        }
        self.detach(id);
        self.push_front(id);
    }

    /// Write back and unlink the tail, returning its now-free slot.
    ///
    /// On write-back failure nothing is unlinked.
    fn evict_lru(&mut self) -> Result<Option<SlotId>> {
        let victim = match self.tail {
            Some(id) => id,
            None => return Ok(None),
        };

        self.nodes[victim.0]
            .entry
            .write_back(&mut self.store, &self.stats)?;

        self.detach(victim);
        self.index.remove(self.nodes[victim.0].entry.key());

        debug!("lru evicting {:?}", self.nodes[victim.0].entry.key());
        self.stats.evictions.fetch_add(1, Ordering::Relaxed);
        Ok(Some(victim))
    }

    /// Insert a new entry at the head, evicting the tail when full.
    fn insert(&mut self, key: &str, value: &str, dirty: bool) -> Result<()> {
        let freed = if self.index.len() == self.capacity {
            self.evict_lru()?
        } else {
            None
        };

        let id = match freed {
            Some(id) => {
                self.nodes[id.0].entry.replace(key, value, dirty);
                id
            }
            None => {
                self.nodes.push(Node {
                    entry: CacheEntry::new(key, value, dirty),
                    prev: None,
                    next: None,
                });
                SlotId::new(self.nodes.len() - 1)
            }
        };

        self.push_front(id);
        self.index.insert(key.to_string(), id);
        Ok(())
    }
}

impl<S: KvStore> KvCache for LruCache<S> {
    fn get(&mut self, key: &str) -> Result<String> {
        check_key(key)?;

        if let Some(&id) = self.index.get(key) {
            self.promote(id);
            self.stats.get_hits.fetch_add(1, Ordering::Relaxed);
            return Ok(self.nodes[id.0].entry.value().to_string());
        }

        self.stats.get_misses.fetch_add(1, Ordering::Relaxed);
        let value = self.store.get(key)?;
        self.insert(key, &value, false)?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        check_key(key)?;
        check_value(value)?;

        if let Some(&id) = self.index.get(key) {
            self.nodes[id.0].entry.update(value);
            self.promote(id);
            self.stats.set_hits.fetch_add(1, Ordering::Relaxed);
            return Ok(());
        }

        self.stats.set_misses.fetch_add(1, Ordering::Relaxed);
        self.insert(key, value, true)
    }

    fn flush(&mut self) -> Result<()> {
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let node = &mut self.nodes[id.0];
            node.entry.write_back(&mut self.store, &self.stats)?;
            cursor = node.next;
        }
        Ok(())
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    fn is_dirty(&self, key: &str) -> Option<bool> {
        self.index
            .get(key)
            .map(|id| self.nodes[id.0].entry.is_dirty())
    }

    fn stats(&self) -> &CacheStats {
        &self.stats
    }

    fn policy(&self) -> CachePolicy {
        CachePolicy::Lru
    }
}
