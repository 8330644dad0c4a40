//! Eviction policy implementations.
//!
//! - [`ClockCache`] - Second chance: slot ring, reference bits, sweeping hand
//! - [`FifoCache`] - Insertion order, no promotion
//! - [`LruCache`] - Recency order, promotion on every access

mod clock;
mod fifo;
mod lru;

use std::fmt;
use std::str::FromStr;

use crate::common::Error;

pub use clock::ClockCache;
pub use fifo::FifoCache;
pub use lru::LruCache;

/// Names the eviction discipline a cache uses.
///
/// # Example
/// ```
/// use kvscache::CachePolicy;
///
/// let policy: CachePolicy = "LRU".parse().unwrap();
/// assert_eq!(policy, CachePolicy::Lru);
/// assert_eq!(policy.to_string(), "lru");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CachePolicy {
    Clock,
    Fifo,
    Lru,
}

impl CachePolicy {
    /// Every policy, in a fixed order.
    pub const ALL: [CachePolicy; 3] = [CachePolicy::Clock, CachePolicy::Fifo, CachePolicy::Lru];

    pub fn as_str(&self) -> &'static str {
        match self {
            CachePolicy::Clock => "clock",
            CachePolicy::Fifo => "fifo",
            CachePolicy::Lru => "lru",
        }
    }
}

impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CachePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "clock" => Ok(CachePolicy::Clock),
            "fifo" => Ok(CachePolicy::Fifo),
            "lru" => Ok(CachePolicy::Lru),
            _ => Err(Error::UnknownPolicy(s.to_string())),
        }
    }
}
