//! Store doubles for cache unit tests.

use std::io;

use crate::common::{Error, Result};
use crate::storage::{KvStore, MemoryStore};

/// A [`MemoryStore`] whose reads and writes can be switched to fail.
#[derive(Debug, Default)]
pub(crate) struct FlakyStore {
    pub inner: MemoryStore,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for FlakyStore {
    fn get(&mut self, key: &str) -> Result<String> {
        if self.fail_reads {
            return Err(Error::Io(io::Error::other("injected read failure")));
        }
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            return Err(Error::Io(io::Error::other("injected write failure")));
        }
        self.inner.set(key, value)
    }
}
