//! Thread-safe wrapper around a single cache.

use parking_lot::Mutex;

use crate::cache::{CachePolicy, KvCache, StatsSnapshot};
use crate::common::Result;

/// Shares one cache between threads.
///
/// Caches mutate their bookkeeping on every call and an eviction is only
/// consistent once its write-back and replacement have both happened, so
/// each `get`, `set` and `flush` runs entirely under one `parking_lot`
/// mutex. Store calls made during the operation happen inside the lock.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use std::thread;
/// use kvscache::{LruCache, MemoryStore, SharedCache};
///
/// let cache = Arc::new(SharedCache::new(LruCache::new(MemoryStore::new(), 8).unwrap()));
///
/// let writer = {
///     let cache = Arc::clone(&cache);
///     thread::spawn(move || cache.set("k", "v").unwrap())
/// };
/// writer.join().unwrap();
///
/// assert_eq!(cache.get("k").unwrap(), "v");
/// ```
#[derive(Debug)]
pub struct SharedCache<C> {
    inner: Mutex<C>,
}

impl<C: KvCache> SharedCache<C> {
    pub fn new(cache: C) -> Self {
        Self {
            inner: Mutex::new(cache),
        }
    }

    pub fn get(&self, key: &str) -> Result<String> {
        self.inner.lock().get(key)
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.inner.lock().set(key, value)
    }

    pub fn flush(&self) -> Result<()> {
        self.inner.lock().flush()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.lock().contains(key)
    }

    pub fn policy(&self) -> CachePolicy {
        self.inner.lock().policy()
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.inner.lock().stats().snapshot()
    }

    /// Run several operations as one critical section.
    pub fn with<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut *guard)
    }

    pub fn into_inner(self) -> C {
        self.inner.into_inner()
    }
}
