//! Common types and utilities shared across kvscache.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration constants and [`CacheConfig`]
//! - Error types
//! - Identifiers (SlotId)

pub mod config;
pub mod error;
mod slot_id;

pub use config::CacheConfig;
pub use error::{Error, Result};
pub use slot_id::SlotId;
