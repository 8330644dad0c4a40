//! CacheEntry - one resident key/value pair.
//!
//! A [`CacheEntry`] holds a key, its most recent value, and the dirty flag
//! that drives write-back. Policy-specific bookkeeping (reference bits,
//! recency links) lives in the policy's own slot type around it.

use std::sync::atomic::Ordering;

use log::{debug, warn};

use crate::cache::CacheStats;
use crate::common::{Error, Result};
use crate::storage::KvStore;

/// A resident cache entry.
///
/// # Dirty Tracking
/// - Created by `set`: dirty
/// - Created by a store fill after a `get` miss: clean
/// - Overwritten by `set`: dirty
/// - Written back by eviction or flush: clean
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    key: String,
    value: String,
    dirty: bool,
}

impl CacheEntry {
    pub fn new(key: &str, value: &str, dirty: bool) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
            dirty,
        }
    }

    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    // ========================================================================
    // Dirty flag
    // ========================================================================

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Overwrite the value from a `set`. Always marks the entry dirty.
    pub fn update(&mut self, value: &str) {
        self.value.clear();
        self.value.push_str(value);
        self.dirty = true;
    }

    /// Reuse this entry's storage for a different key.
    ///
    /// Callers must have written the old contents back first.
    pub(crate) fn replace(&mut self, key: &str, value: &str, dirty: bool) {
        self.key.clear();
        self.key.push_str(key);
        self.value.clear();
        self.value.push_str(value);
        self.dirty = dirty;
    }

    /// Write this entry to `store` if it is dirty, then mark it clean.
    ///
    /// Returns whether a write happened. On failure the entry is left
    /// untouched (still dirty) and the store error is wrapped in
    /// [`Error::WriteBack`].
    pub(crate) fn write_back<S: KvStore>(
        &mut self,
        store: &mut S,
        stats: &CacheStats,
    ) -> Result<bool> {
        if !self.dirty {
            return Ok(false);
        }

        if let Err(e) = store.set(&self.key, &self.value) {
            warn!("write-back of {:?} failed: {}", self.key, e);
            return Err(Error::WriteBack {
                key: self.key.clone(),
                source: Box::new(e),
            });
        }

        debug!("wrote back {:?}", self.key);
        self.dirty = false;
        stats.write_backs.fetch_add(1, Ordering::Relaxed);
        Ok(true)
    }
}
