//! kvscache - A write-back key-value cache with swappable eviction policies.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            kvscache                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │        SharedCache (cache/)  [optional, thread-safe]     │   │
//! │  │           one mutex around each get/set/flush            │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │          Cache Layer (cache/)  [Runtime Swappable]      │   │
//! │  │   ┌─────────────────────────────────────────────────┐   │   │
//! │  │   │    Eviction Policies: CLOCK | FIFO | LRU        │   │   │
//! │  │   │         (selected via AnyCache/CacheConfig)     │   │   │
//! │  │   └─────────────────────────────────────────────────┘   │   │
//! │  │        KvCache + CacheEntry + CacheStats                 │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓  misses, write-backs             │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │           Storage Layer (storage/)                       │   │
//! │  │        KvStore + MemoryStore + FileStore + record        │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (SlotId, Error, config)
//! - [`cache`] - Cache contract and eviction policies
//! - [`storage`] - Backing stores
//!
//! # Quick Start
//! ```
//! use kvscache::{CacheConfig, CachePolicy, KvCache, MemoryStore};
//!
//! let mut cache = CacheConfig::new(CachePolicy::Clock, 2)
//!     .build(MemoryStore::new())
//!     .unwrap();
//!
//! cache.set("a", "1").unwrap(); // dirty, not yet in the store
//! cache.flush().unwrap();       // written back
//! assert_eq!(cache.store().peek("a"), Some("1"));
//! ```

pub mod cache;
pub mod common;
pub mod storage;

// Re-export commonly used items at crate root for convenience
pub use common::config::{MAX_KEY_LEN, MAX_VALUE_LEN};
pub use common::{CacheConfig, Error, Result, SlotId};

pub use cache::{
    AnyCache, CacheEntry, CachePolicy, CacheStats, ClockCache, FifoCache, KvCache, LruCache,
    SharedCache, StatsSnapshot,
};
pub use storage::{FileStore, KvStore, MemoryStore};
