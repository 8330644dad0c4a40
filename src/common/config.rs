//! Configuration for kvscache.
//!
//! Size limits are compile-time constants shared by every policy. The
//! runtime choice of policy and capacity lives in [`CacheConfig`].

use std::fmt;

use crate::cache::{AnyCache, CachePolicy};
use crate::common::{Error, Result};
use crate::storage::KvStore;

/// Maximum key length in bytes (UTF-8 encoded).
pub const MAX_KEY_LEN: usize = 32;

/// Maximum value length in bytes (UTF-8 encoded).
pub const MAX_VALUE_LEN: usize = 1024;

/// Capacity used by [`CacheConfig::default`].
pub const DEFAULT_CAPACITY: usize = 64;

/// Reject keys longer than [`MAX_KEY_LEN`].
#[inline]
pub fn check_key(key: &str) -> Result<()> {
    if key.len() > MAX_KEY_LEN {
        return Err(Error::KeyTooLong {
            len: key.len(),
            max: MAX_KEY_LEN,
        });
    }
    Ok(())
}

/// Reject values longer than [`MAX_VALUE_LEN`].
#[inline]
pub fn check_value(value: &str) -> Result<()> {
    if value.len() > MAX_VALUE_LEN {
        return Err(Error::ValueTooLong {
            len: value.len(),
            max: MAX_VALUE_LEN,
        });
    }
    Ok(())
}

/// Runtime cache configuration: which policy, how many entries.
///
/// # Example
/// ```
/// use kvscache::{CacheConfig, CachePolicy, KvCache, MemoryStore};
///
/// let config = CacheConfig::new(CachePolicy::Lru, 4);
/// let mut cache = config.build(MemoryStore::new()).unwrap();
/// cache.set("a", "1").unwrap();
/// assert_eq!(cache.get("a").unwrap(), "1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    pub policy: CachePolicy,
    pub capacity: usize,
}

impl CacheConfig {
    pub fn new(policy: CachePolicy, capacity: usize) -> Self {
        Self { policy, capacity }
    }

    /// Set the eviction policy.
    pub fn with_policy(mut self, policy: CachePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Check the configuration without building anything.
    ///
    /// # Errors
    /// `Error::InvalidCapacity` if `capacity` is 0.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::InvalidCapacity(self.capacity));
        }
        Ok(())
    }

    /// Build a cache over `store` using this configuration.
    pub fn build<S: KvStore>(&self, store: S) -> Result<AnyCache<S>> {
        self.validate()?;
        AnyCache::new(self.policy, store, self.capacity)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(CachePolicy::Lru, DEFAULT_CAPACITY)
    }
}

impl fmt::Display for CacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} cache, capacity {}", self.policy, self.capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_key_bounds() {
        assert!(check_key("").is_ok());
        assert!(check_key(&"k".repeat(MAX_KEY_LEN)).is_ok());

        let err = check_key(&"k".repeat(MAX_KEY_LEN + 1)).unwrap_err();
        assert!(matches!(err, Error::KeyTooLong { len: 33, max: 32 }));
    }

    #[test]
    fn test_check_value_counts_bytes() {
        // 'é' is two bytes in UTF-8
        let value = "é".repeat(MAX_VALUE_LEN / 2);
        assert!(check_value(&value).is_ok());

        let value = "é".repeat(MAX_VALUE_LEN / 2 + 1);
        assert!(matches!(
            check_value(&value),
            Err(Error::ValueTooLong { .. })
        ));
    }

    #[test]
    fn test_config_validate() {
        assert!(CacheConfig::default().validate().is_ok());
        assert!(matches!(
            CacheConfig::default().with_capacity(0).validate(),
            Err(Error::InvalidCapacity(0))
        ));
    }

    #[test]
    fn test_config_builders() {
        let config = CacheConfig::default()
            .with_policy(CachePolicy::Clock)
            .with_capacity(8);
        assert_eq!(config, CacheConfig::new(CachePolicy::Clock, 8));
        assert_eq!(format!("{}", config), "clock cache, capacity 8");
    }
}
