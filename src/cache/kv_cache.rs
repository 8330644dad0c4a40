//! The operation contract shared by every eviction policy.

use crate::cache::{CachePolicy, CacheStats};
use crate::common::Result;

/// A bounded write-back cache in front of a [`KvStore`](crate::KvStore).
///
/// Every policy implements the same operations with the same outcomes;
/// only the choice of eviction victim differs.
///
/// # Errors
/// - `get` returns `Error::KeyNotFound` only when the key is in neither the
///   cache nor the store. Other store read errors pass through unchanged.
/// - `get`, `set` and `flush` return `Error::WriteBack` when the store
///   rejects a write-back. The unwritten entry stays resident and dirty,
///   and the entry that needed its slot is not installed.
/// - Oversized keys or values are rejected before any state changes.
pub trait KvCache {
    /// Read `key`, filling from the store on a miss.
    ///
    /// Never marks an entry dirty.
    fn get(&mut self, key: &str) -> Result<String>;

    /// Write `key`. The entry is dirty until written back.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Write every dirty entry back to the store.
    fn flush(&mut self) -> Result<()>;

    /// Number of resident entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of resident entries.
    fn capacity(&self) -> usize;

    /// Whether `key` is resident. Does not count as an access.
    fn contains(&self, key: &str) -> bool;

    /// Dirty state of `key`, or `None` if it isn't resident.
    /// Does not count as an access.
    fn is_dirty(&self, key: &str) -> Option<bool>;

    fn stats(&self) -> &CacheStats;

    fn policy(&self) -> CachePolicy;
}
