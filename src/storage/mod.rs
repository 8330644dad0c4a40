//! Storage layer - the backing stores caches write back to.
//!
//! This module handles persistent storage:
//! - [`KvStore`] - The store contract every cache depends on
//! - [`MemoryStore`] - In-memory store with call counters
//! - [`FileStore`] - Directory-backed store with checksummed records

mod file_store;
mod memory_store;
pub mod record;
mod store;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use store::KvStore;
