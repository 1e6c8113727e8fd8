//! Typed convenience operations over a key-value store.
//!
//! Values are stored as plain strings with no type tag. The caller decodes
//! by picking the `get_as_*` method that matches the type used at `set`
//! time.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use keystash_core::error::AppError;
use keystash_core::result::AppResult;
use keystash_core::traits::store::{KeyExpiry, KeyValueStore};
use keystash_core::ttl::TtlSpec;

/// A value accepted by [`RedisCacheHelper::set`].
#[derive(Debug, Clone, PartialEq)]
pub enum CacheValue {
    /// Stored verbatim.
    Str(String),
    /// Stored as decimal text; integral values carry no fraction and
    /// infinities are written as `Infinity`/`-Infinity`.
    Number(f64),
    /// Stored as `"true"` or `"false"`.
    Bool(bool),
    /// Stored as JSON text.
    Object(serde_json::Value),
}

impl CacheValue {
    /// Wrap any serializable value as an object.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> AppResult<Self> {
        Ok(Self::Object(serde_json::to_value(value)?))
    }

    /// The string written to the store.
    pub fn encode(&self) -> AppResult<String> {
        Ok(match self {
            Self::Str(s) => s.clone(),
            Self::Number(n) if n.is_infinite() => {
                let text = if *n > 0.0 { "Infinity" } else { "-Infinity" };
                text.to_string()
            }
            Self::Number(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Object(value) => serde_json::to_string(value)?,
        })
    }
}

impl From<&str> for CacheValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for CacheValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for CacheValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<serde_json::Value> for CacheValue {
    fn from(value: serde_json::Value) -> Self {
        Self::Object(value)
    }
}

macro_rules! number_into_cache_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for CacheValue {
                fn from(value: $ty) -> Self {
                    Self::Number(value as f64)
                }
            }
        )*
    };
}

number_into_cache_value!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

/// Typed cache helper over the shared client handle.
///
/// Holds the store by `Arc`, so clones share one connection. No operation
/// takes a lock or adds timeouts; each one is an independent round trip.
#[derive(Debug, Clone)]
pub struct RedisCacheHelper {
    store: Arc<dyn KeyValueStore>,
}

impl RedisCacheHelper {
    /// Create a helper over a client handle.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Get a reference to the underlying store.
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Store a value, optionally with a time-to-live.
    ///
    /// The TTL is validated before anything is written; a malformed TTL
    /// fails with `InvalidArgument` and leaves the key untouched. The write
    /// and the expiry are two separate commands, so a failure between them
    /// leaves the key set without expiry. A TTL of zero means no expiry.
    ///
    /// Returns `true` if the write was acknowledged with `OK`. The outcome
    /// of the expiry command is not reflected.
    pub async fn set(
        &self,
        key: &str,
        value: impl Into<CacheValue>,
        ttl: Option<TtlSpec>,
    ) -> AppResult<bool> {
        let seconds = ttl.as_ref().map(TtlSpec::to_seconds).transpose()?;
        let encoded = value.into().encode()?;

        let acknowledged = self.store.set(key, &encoded).await?;

        if let Some(seconds) = seconds.filter(|s| *s > 0) {
            let applied = self.store.expire(key, seconds).await?;
            debug!(key, seconds, applied, "Applied expiry");
        }

        Ok(acknowledged)
    }

    /// Delete zero or more keys. Returns how many existed.
    pub async fn del(&self, keys: &[&str]) -> AppResult<u64> {
        if keys.is_empty() {
            return Ok(0);
        }
        self.store.del(keys).await
    }

    /// Get a value as a string.
    pub async fn get_as_string(
        &self,
        key: &str,
        default: Option<String>,
    ) -> AppResult<Option<String>> {
        match self.raw(key).await? {
            Some(value) => Ok(Some(value)),
            None => Ok(default),
        }
    }

    /// Get a value as a number.
    ///
    /// Text that is not numeric decodes to `NaN` rather than an error.
    pub async fn get_as_number(&self, key: &str, default: Option<f64>) -> AppResult<Option<f64>> {
        match self.raw(key).await? {
            Some(value) => Ok(Some(coerce_number(&value))),
            None => Ok(default),
        }
    }

    /// Get a value as a boolean.
    ///
    /// Only `"true"`, `"True"` and `"1"` decode to `true`.
    pub async fn get_as_boolean(
        &self,
        key: &str,
        default: Option<bool>,
    ) -> AppResult<Option<bool>> {
        match self.raw(key).await? {
            Some(value) => Ok(Some(matches!(value.as_str(), "true" | "True" | "1"))),
            None => Ok(default),
        }
    }

    /// Get a value by deserializing it from JSON.
    ///
    /// Malformed JSON fails with a `Deserialization` error.
    pub async fn get_as_object<T: DeserializeOwned>(
        &self,
        key: &str,
        default: Option<T>,
    ) -> AppResult<Option<T>> {
        match self.raw(key).await? {
            Some(value) => serde_json::from_str(&value)
                .map(Some)
                .map_err(AppError::deserialization),
            None => Ok(default),
        }
    }

    /// Remaining lifetime of a key.
    pub async fn ttl(&self, key: &str) -> AppResult<KeyExpiry> {
        self.store.ttl(key).await
    }

    /// Check that the store is reachable.
    pub async fn ping(&self) -> AppResult<bool> {
        self.store.ping().await
    }

    /// Stored text, treating an empty string as absent.
    async fn raw(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.store.get(key).await?.filter(|value| !value.is_empty()))
    }
}

/// Coerce stored text to a number.
///
/// Surrounding whitespace is ignored and blank text is zero. Decimal and
/// exponent forms, `Infinity`, and `0x`/`0o`/`0b` integers are accepted.
/// Anything else is `NaN`.
fn coerce_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u64::from_str_radix(&trimmed[2..], radix)
            .map(|n| n as f64)
            .unwrap_or(f64::NAN);
    }

    let (sign, magnitude) = match trimmed.as_bytes()[0] {
        b'-' => (-1.0, &trimmed[1..]),
        b'+' => (1.0, &trimmed[1..]),
        _ => (1.0, trimmed),
    };
    if magnitude == "Infinity" {
        return sign * f64::INFINITY;
    }

    // Rust also accepts "inf" and "nan" spellings, which are not numbers here.
    let is_numeric = !magnitude.is_empty()
        && magnitude
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !is_numeric {
        return f64::NAN;
    }

    trimmed.parse().unwrap_or(f64::NAN)
}
