//! In-memory key-value store using the moka crate.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use tracing::debug;

use keystash_core::result::AppResult;
use keystash_core::traits::store::{KeyExpiry, KeyValueStore};

/// Default maximum number of entries.
pub const DEFAULT_MAX_CAPACITY: u64 = 10_000;

/// A stored value and its optional deadline.
#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|at| at > now)
    }
}

/// Per-entry expiry driven by the deadline stored alongside the value.
struct DeadlineExpiry;

impl Expiry<String, Entry> for DeadlineExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &Entry,
        created_at: Instant,
    ) -> Option<Duration> {
        value
            .expires_at
            .map(|at| at.saturating_duration_since(created_at))
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &Entry,
        updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        value
            .expires_at
            .map(|at| at.saturating_duration_since(updated_at))
    }
}

/// In-process store with Redis-like expiry semantics.
///
/// Writes clear any TTL, `expire` sets a per-key deadline, and `ttl`
/// reports the remaining lifetime rounded to the nearest second.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    /// The underlying moka cache.
    cache: Cache<String, Entry>,
}

impl MemoryStore {
    /// Create a store bounded to `max_capacity` entries.
    pub fn new(max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(DeadlineExpiry)
            .build();
        Self { cache }
    }

    async fn live_entry(&self, key: &str) -> Option<Entry> {
        self.cache
            .get(key)
            .await
            .filter(|entry| entry.is_live(Instant::now()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CAPACITY)
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.live_entry(key).await.map(|entry| entry.value))
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<bool> {
        self.cache
            .insert(
                key.to_string(),
                Entry {
                    value: value.to_string(),
                    expires_at: None,
                },
            )
            .await;
        Ok(true)
    }

    async fn del(&self, keys: &[&str]) -> AppResult<u64> {
        let now = Instant::now();
        let mut removed = 0u64;
        for key in keys {
            if let Some(entry) = self.cache.remove(*key).await {
                if entry.is_live(now) {
                    removed += 1;
                }
            }
        }
        debug!(requested = keys.len(), removed, "Deleted keys");
        Ok(removed)
    }

    async fn expire(&self, key: &str, seconds: u64) -> AppResult<bool> {
        let Some(entry) = self.live_entry(key).await else {
            return Ok(false);
        };

        if seconds == 0 {
            self.cache.invalidate(key).await;
            return Ok(true);
        }

        let expires_at = Instant::now().checked_add(Duration::from_secs(seconds));
        self.cache
            .insert(
                key.to_string(),
                Entry {
                    value: entry.value,
                    expires_at,
                },
            )
            .await;
        Ok(true)
    }

    async fn ttl(&self, key: &str) -> AppResult<KeyExpiry> {
        let expiry = match self.live_entry(key).await {
            None => KeyExpiry::Missing,
            Some(Entry {
                expires_at: None, ..
            }) => KeyExpiry::Persistent,
            Some(Entry {
                expires_at: Some(at),
                ..
            }) => {
                let remaining = at.saturating_duration_since(Instant::now());
                let seconds = (remaining.as_millis() + 500) / 1000;
                KeyExpiry::Seconds(u64::try_from(seconds).unwrap_or(u64::MAX))
            }
        };
        Ok(expiry)
    }

    async fn ping(&self) -> AppResult<bool> {
        Ok(true)
    }
}
