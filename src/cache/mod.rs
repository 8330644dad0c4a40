//! Write-back caching.
//!
//! A cache holds a bounded working set in front of a [`KvStore`](crate::KvStore),
//! defers writes until eviction or flush, and picks victims by policy.
//!
//! # Components
//! - [`KvCache`] - The operation contract every policy implements
//! - [`ClockCache`] / [`FifoCache`] / [`LruCache`] - The policies
//! - [`AnyCache`] - Policy chosen at runtime
//! - [`SharedCache`] - Mutex wrapper for multi-threaded callers
//! - [`CacheEntry`] - A resident key/value pair with its dirty flag
//! - [`CacheStats`] - Per-instance counters

mod any_cache;
mod entry;
mod kv_cache;
pub mod policy;
mod shared_cache;
mod stats;

#[cfg(test)]
mod test_util;

pub use any_cache::AnyCache;
pub use entry::CacheEntry;
pub use kv_cache::KvCache;
pub use policy::{CachePolicy, ClockCache, FifoCache, LruCache};
pub use shared_cache::SharedCache;
pub use stats::{CacheStats, StatsSnapshot};
