//! In-memory backing store.

use std::collections::HashMap;

use crate::common::{Error, Result};
use crate::storage::KvStore;

/// A `HashMap`-backed [`KvStore`] that counts the calls it receives.
///
/// The counters make it easy to tell whether a cache consulted its store:
///
/// ```
/// use kvscache::{FifoCache, KvCache, MemoryStore};
///
/// let mut cache = FifoCache::new(MemoryStore::new(), 2).unwrap();
/// cache.set("a", "1").unwrap();
/// assert_eq!(cache.get("a").unwrap(), "1");
/// assert_eq!(cache.store().read_count(), 0);
/// ```
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    data: HashMap<String, String>,
    reads: u64,
    writes: u64,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `pairs`.
    ///
    /// Seeding does not count as writes.
    pub fn with_entries<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            data: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            reads: 0,
            writes: 0,
        }
    }

    /// Look at a stored value without counting a read.
    pub fn peek(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    /// Number of keys held.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of `get` calls received, hits and misses alike.
    pub fn read_count(&self) -> u64 {
        self.reads
    }

    /// Number of `set` calls received.
    pub fn write_count(&self) -> u64 {
        self.writes
    }
}

impl KvStore for MemoryStore {
    fn get(&mut self, key: &str) -> Result<String> {
        self.reads += 1;
        self.data
            .get(key)
            .cloned()
            .ok_or_else(|| Error::KeyNotFound(key.to_string()))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.writes += 1;
        self.data.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
