//! Redis connection options.

use serde::{Deserialize, Serialize};

/// Resolved connection options for the Redis client.
///
/// Connection identity comes either from `url` or from the discrete
/// `host`/`port`/`username`/`password`/`db` fields, never a mix. When `url`
/// is present it is authoritative and the discrete identity fields are
/// ignored. `key_prefix` and `connect_timeout_ms` tune the client in both
/// forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedisOptions {
    /// Connection URI, e.g. `redis://:secret@127.0.0.1:6380/4` or a
    /// `rediss://` URI for TLS.
    #[serde(default)]
    pub url: Option<String>,
    /// Server host name or address.
    #[serde(default)]
    pub host: Option<String>,
    /// Server port.
    #[serde(default)]
    pub port: Option<u16>,
    /// ACL user name.
    #[serde(default)]
    pub username: Option<String>,
    /// Password.
    #[serde(default)]
    pub password: Option<String>,
    /// Logical database index.
    #[serde(default)]
    pub db: Option<i64>,
    /// Connect over TLS when building from discrete fields.
    #[serde(default)]
    pub tls: bool,
    /// Prefix prepended to every key the client touches.
    #[serde(default)]
    pub key_prefix: String,
    /// Upper bound for establishing the initial connection, in milliseconds.
    #[serde(default)]
    pub connect_timeout_ms: Option<u64>,
}

impl RedisOptions {
    /// Options that connect through a single URI.
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Options that connect to `host:port` with no credentials.
    pub fn from_host(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: Some(host.into()),
            port: Some(port),
            ..Self::default()
        }
    }

    /// Set the key prefix.
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    /// Set the connect timeout.
    pub fn with_connect_timeout_ms(mut self, millis: u64) -> Self {
        self.connect_timeout_ms = Some(millis);
        self
    }

    /// Whether any discrete identity field is set.
    pub fn has_discrete_identity(&self) -> bool {
        self.host.is_some()
            || self.port.is_some()
            || self.username.is_some()
            || self.password.is_some()
            || self.db.is_some()
            || self.tls
    }
}
