//! Key-value operations against Redis.

use async_trait::async_trait;
use redis::{AsyncCommands, Value};
use tracing::debug;

use keystash_core::error::{AppError, ErrorKind};
use keystash_core::result::AppResult;
use keystash_core::traits::store::{KeyExpiry, KeyValueStore};

use super::client::RedisClient;

/// Map a Redis error to an AppError.
fn map_err(e: redis::RedisError) -> AppError {
    AppError::with_source(ErrorKind::Cache, format!("Redis error: {e}"), e)
}

/// Whether a reply is the `OK` status.
fn is_ok_status(reply: &Value) -> bool {
    match reply {
        Value::Okay => true,
        Value::SimpleString(status) => status == "OK",
        _ => false,
    }
}

#[async_trait]
impl KeyValueStore for RedisClient {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let full_key = self.prefixed_key(key);
        let mut conn = self.conn_mut();
        let result: Option<String> = conn.get(&full_key).await.map_err(map_err)?;
        Ok(result)
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<bool> {
        let full_key = self.prefixed_key(key);
        let mut conn = self.conn_mut();
        let reply: Value = conn.set(&full_key, value).await.map_err(map_err)?;
        Ok(is_ok_status(&reply))
    }

    async fn del(&self, keys: &[&str]) -> AppResult<u64> {
        if keys.is_empty() {
            return Ok(0);
        }
        let full_keys: Vec<String> = keys.iter().map(|key| self.prefixed_key(key)).collect();
        let mut conn = self.conn_mut();
        let removed: u64 = conn.del(full_keys.as_slice()).await.map_err(map_err)?;
        debug!(requested = keys.len(), removed, "Deleted keys");
        Ok(removed)
    }

    async fn expire(&self, key: &str, seconds: u64) -> AppResult<bool> {
        let full_key = self.prefixed_key(key);
        let mut conn = self.conn_mut();
        let seconds = i64::try_from(seconds).unwrap_or(i64::MAX);
        let applied: bool = conn.expire(&full_key, seconds).await.map_err(map_err)?;
        Ok(applied)
    }

    async fn ttl(&self, key: &str) -> AppResult<KeyExpiry> {
        let full_key = self.prefixed_key(key);
        let mut conn = self.conn_mut();
        let reply: i64 = conn.ttl(&full_key).await.map_err(map_err)?;
        Ok(KeyExpiry::from_reply(reply))
    }

    async fn ping(&self) -> AppResult<bool> {
        let mut conn = self.conn_mut();
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(map_err)?;
        Ok(pong == "PONG")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_status() {
        assert!(is_ok_status(&Value::Okay));
        assert!(is_ok_status(&Value::SimpleString("OK".to_string())));
        assert!(!is_ok_status(&Value::Nil));
        assert!(!is_ok_status(&Value::SimpleString("QUEUED".to_string())));
    }
}
