//! Error types for kvscache.

use thiserror::Error;

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in kvscache.
///
/// Cache operations and backing stores share this one type, so a store
/// failure reaches the caller of `get`/`set`/`flush` unchanged.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error from a file-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key exists in neither the cache nor the backing store.
    #[error("Key {0:?} not found")]
    KeyNotFound(String),

    /// The backing store rejected a write-back of a dirty entry.
    ///
    /// The entry is still resident and still dirty.
    #[error("Write-back of key {key:?} failed: {source}")]
    WriteBack {
        key: String,
        #[source]
        source: Box<Error>,
    },

    /// Caches need room for at least one entry.
    #[error("Invalid cache capacity: {0}")]
    InvalidCapacity(usize),

    #[error("Key is {len} bytes, maximum is {max}")]
    KeyTooLong { len: usize, max: usize },

    #[error("Value is {len} bytes, maximum is {max}")]
    ValueTooLong { len: usize, max: usize },

    /// A stored record failed its checksum or is truncated.
    #[error("Corrupt record: {0}")]
    CorruptRecord(String),

    /// Policy name not recognised.
    #[error("Unknown eviction policy: {0:?}")]
    UnknownPolicy(String),
}

impl Error {
    /// True for [`Error::KeyNotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::KeyNotFound(_))
    }
}
