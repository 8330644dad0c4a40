//! Runtime selection between eviction policies.

use crate::cache::{CachePolicy, CacheStats, ClockCache, FifoCache, KvCache, LruCache};
use crate::common::Result;
use crate::storage::KvStore;

/// A cache whose policy is chosen at runtime.
///
/// Dispatches every [`KvCache`] operation to the concrete policy while
/// keeping the store type visible, so callers can still inspect or recover
/// it.
///
/// # Example
/// ```
/// use kvscache::{AnyCache, CachePolicy, KvCache, MemoryStore};
///
/// for policy in CachePolicy::ALL {
///     let mut cache = AnyCache::new(policy, MemoryStore::new(), 2).unwrap();
///     cache.set("a", "1").unwrap();
///     cache.flush().unwrap();
///     assert_eq!(cache.store().peek("a"), Some("1"));
/// }
/// ```
#[derive(Debug)]
pub enum AnyCache<S> {
    Clock(ClockCache<S>),
    Fifo(FifoCache<S>),
    Lru(LruCache<S>),
}

impl<S: KvStore> AnyCache<S> {
    /// Build a cache of the given policy.
    ///
    /// # Errors
    /// `Error::InvalidCapacity` if `capacity` is 0.
    pub fn new(policy: CachePolicy, store: S, capacity: usize) -> Result<Self> {
        Ok(match policy {
            CachePolicy::Clock => AnyCache::Clock(ClockCache::new(store, capacity)?),
            CachePolicy::Fifo => AnyCache::Fifo(FifoCache::new(store, capacity)?),
            CachePolicy::Lru => AnyCache::Lru(LruCache::new(store, capacity)?),
        })
    }

    pub fn store(&self) -> &S {
        match self {
            AnyCache::Clock(c) => c.store(),
            AnyCache::Fifo(c) => c.store(),
            AnyCache::Lru(c) => c.store(),
        }
    }

    pub fn store_mut(&mut self) -> &mut S {
        match self {
            AnyCache::Clock(c) => c.store_mut(),
            AnyCache::Fifo(c) => c.store_mut(),
            AnyCache::Lru(c) => c.store_mut(),
        }
    }

    /// Release the cache without flushing and hand back the store.
    pub fn into_store(self) -> S {
        match self {
            AnyCache::Clock(c) => c.into_store(),
            AnyCache::Fifo(c) => c.into_store(),
            AnyCache::Lru(c) => c.into_store(),
        }
    }

    fn as_dyn(&self) -> &dyn KvCache {
        match self {
            AnyCache::Clock(c) => c,
            AnyCache::Fifo(c) => c,
            AnyCache::Lru(c) => c,
        }
    }

    fn as_dyn_mut(&mut self) -> &mut dyn KvCache {
        match self {
            AnyCache::Clock(c) => c,
            AnyCache::Fifo(c) => c,
            AnyCache::Lru(c) => c,
        }
    }
}

impl<S: KvStore> KvCache for AnyCache<S> {
    fn get(&mut self, key: &str) -> Result<String> {
        self.as_dyn_mut().get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.as_dyn_mut().set(key, value)
    }

    fn flush(&mut self) -> Result<()> {
        self.as_dyn_mut().flush()
    }

    fn len(&self) -> usize {
        self.as_dyn().len()
    }

    fn capacity(&self) -> usize {
        self.as_dyn().capacity()
    }

    fn contains(&self, key: &str) -> bool {
        self.as_dyn().contains(key)
    }

    fn is_dirty(&self, key: &str) -> Option<bool> {
        self.as_dyn().is_dirty(key)
    }

    fn stats(&self) -> &CacheStats {
        self.as_dyn().stats()
    }

    fn policy(&self) -> CachePolicy {
        self.as_dyn().policy()
    }
}
