//! The backing-store contract every cache writes back to.

use crate::common::Result;

/// A persistent key-value service sitting behind a cache.
///
/// Calls are synchronous and must complete before the cache operation that
/// issued them returns. Stores only ever receive copies of key and value
/// text; they never see cache-owned storage.
pub trait KvStore {
    /// Look up `key`.
    ///
    /// # Errors
    /// `Error::KeyNotFound` if the store has no value for `key`. Any other
    /// error is passed through to the cache's caller unchanged.
    fn get(&mut self, key: &str) -> Result<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: KvStore + ?Sized> KvStore for &mut S {
    fn get(&mut self, key: &str) -> Result<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

impl<S: KvStore + ?Sized> KvStore for Box<S> {
    fn get(&mut self, key: &str) -> Result<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}
