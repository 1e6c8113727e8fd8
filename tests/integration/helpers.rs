//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use keystash::{
    AppResult, KeyExpiry, KeyValueStore, MemoryStore, RedisCacheHelper, RedisModule, RedisOptions,
};

/// Environment variable naming the Redis server used by live tests.
pub const REDIS_URL_ENV: &str = "KEYSTASH_TEST_REDIS_URL";

/// Helper bound to a fresh in-memory store
pub struct TestCache {
    /// The helper under test
    pub helper: RedisCacheHelper,
    /// Direct access to stored strings
    pub store: Arc<MemoryStore>,
}

impl TestCache {
    /// Create a helper over an empty in-memory store
    pub fn memory() -> Self {
        let store = Arc::new(MemoryStore::default());
        Self {
            helper: RedisCacheHelper::new(store.clone()),
            store,
        }
    }
}

/// Connect to the live test server, or `None` when it is not configured.
///
/// Each caller gets its own key prefix so tests can run in parallel.
pub async fn live_module(test_name: &str) -> Option<RedisModule> {
    let Ok(url) = std::env::var(REDIS_URL_ENV) else {
        eprintln!("skipping {test_name}: {REDIS_URL_ENV} is not set");
        return None;
    };

    let options = RedisOptions::from_url(url)
        .with_key_prefix(format!("keystash-test:{}:{test_name}:", std::process::id()))
        .with_connect_timeout_ms(2000);

    Some(
        RedisModule::for_root(options)
            .await
            .expect("Failed to connect to test Redis"),
    )
}

/// Store that records every command it receives
#[derive(Debug, Default)]
pub struct RecordingStore {
    /// Commands in the order they arrived
    pub log: Mutex<Vec<String>>,
    /// Whether writes are acknowledged with OK
    pub reject_writes: bool,
}

impl RecordingStore {
    /// Snapshot of the command log
    pub fn commands(&self) -> Vec<String> {
        self.log.lock().expect("log poisoned").clone()
    }

    fn record(&self, entry: String) {
        self.log.lock().expect("log poisoned").push(entry);
    }
}

#[async_trait]
impl KeyValueStore for RecordingStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.record(format!("GET {key}"));
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<bool> {
        self.record(format!("SET {key} {value}"));
        Ok(!self.reject_writes)
    }

    async fn del(&self, keys: &[&str]) -> AppResult<u64> {
        self.record(format!("DEL {}", keys.join(" ")));
        Ok(0)
    }

    async fn expire(&self, key: &str, seconds: u64) -> AppResult<bool> {
        self.record(format!("EXPIRE {key} {seconds}"));
        Ok(false)
    }

    async fn ttl(&self, key: &str) -> AppResult<KeyExpiry> {
        self.record(format!("TTL {key}"));
        Ok(KeyExpiry::Missing)
    }

    async fn ping(&self) -> AppResult<bool> {
        Ok(true)
    }
}
