//! Key-value store trait the cache helper runs against.

use async_trait::async_trait;

use crate::result::AppResult;

/// Remaining lifetime of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyExpiry {
    /// The key does not exist.
    Missing,
    /// The key exists and never expires.
    Persistent,
    /// The key expires in this many seconds.
    Seconds(u64),
}

impl KeyExpiry {
    /// Map a Redis `TTL` reply (-2, -1, or seconds) onto a `KeyExpiry`.
    pub fn from_reply(reply: i64) -> Self {
        match reply {
            -2 => Self::Missing,
            n if n < 0 => Self::Persistent,
            n => Self::Seconds(n as u64),
        }
    }
}

/// String-valued key-value store (Redis or in-memory).
///
/// Keys and values are plain strings. Implementations own any key
/// prefixing. None of the methods retry.
#[async_trait]
pub trait KeyValueStore: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value by key. Returns `None` if the key does not exist or has expired.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Write a value without expiry, replacing any previous TTL.
    /// Returns `true` if the store acknowledged the write with `OK`.
    async fn set(&self, key: &str, value: &str) -> AppResult<bool>;

    /// Delete keys. Returns how many of them existed.
    async fn del(&self, keys: &[&str]) -> AppResult<u64>;

    /// Set the TTL on an existing key. Returns `false` if the key does not exist.
    /// A zero TTL deletes the key.
    async fn expire(&self, key: &str, seconds: u64) -> AppResult<bool>;

    /// Remaining lifetime of a key.
    async fn ttl(&self, key: &str) -> AppResult<KeyExpiry>;

    /// Check that the store is reachable.
    async fn ping(&self) -> AppResult<bool>;
}
