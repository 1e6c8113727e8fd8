//! Redis connection management.

use std::time::Duration;

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use redis::Client;
use redis::aio::ConnectionManager;
use tracing::{info, warn};

use keystash_core::config::redis::RedisOptions;
use keystash_core::error::{AppError, ErrorKind};
use keystash_core::result::AppResult;

/// Host used when neither `url` nor `host` is configured.
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Port used when neither `url` nor `port` is configured.
pub const DEFAULT_PORT: u16 = 6379;

/// Shared Redis client handle.
///
/// Wraps a multiplexed, reconnecting [`ConnectionManager`]. Cloning the
/// manager is cheap and every clone talks over the same connection, so one
/// `RedisClient` serves all callers for the life of the process.
#[derive(Clone)]
pub struct RedisClient {
    /// Redis connection manager (multiplexed, reconnecting).
    conn: ConnectionManager,
    /// Key prefix for all keys.
    key_prefix: String,
    /// Connection target with the password masked, for diagnostics.
    display_url: String,
}

impl std::fmt::Debug for RedisClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisClient")
            .field("url", &self.display_url)
            .field("key_prefix", &self.key_prefix)
            .finish_non_exhaustive()
    }
}

impl RedisClient {
    /// Create a new Redis client from resolved options.
    ///
    /// Invalid connection parameters fail with a `Configuration` error.
    /// Failing to reach the server (or exceeding `connect_timeout_ms`)
    /// fails with a `Cache` error carrying the redis error as its source.
    pub async fn connect(options: &RedisOptions) -> AppResult<Self> {
        if options.url.is_some() && options.has_discrete_identity() {
            warn!("Both url and discrete connection fields are set; using url");
        }

        let url = connection_url(options);
        let display_url = mask_redis_url(&url);
        info!(url = %display_url, "Connecting to Redis");

        let client = open_client(&url)?;

        let connecting = ConnectionManager::new(client);
        let connected = match options.connect_timeout_ms {
            Some(millis) => tokio::time::timeout(Duration::from_millis(millis), connecting)
                .await
                .map_err(|_| {
                    AppError::cache(format!("Timed out connecting to Redis after {millis}ms"))
                })?,
            None => connecting.await,
        };
        let conn = connected.map_err(|e| {
            AppError::with_source(ErrorKind::Cache, "Failed to connect to Redis", e)
        })?;

        info!("Successfully connected to Redis");
        Ok(Self {
            conn,
            key_prefix: options.key_prefix.clone(),
            display_url,
        })
    }

    /// Check that options yield a connection target the driver accepts.
    ///
    /// Performs the same parse as [`RedisClient::connect`] without
    /// contacting the server.
    pub fn validate(options: &RedisOptions) -> AppResult<()> {
        open_client(&connection_url(options)).map(|_| ())
    }

    /// Get a mutable clone of the connection manager.
    pub fn conn_mut(&self) -> ConnectionManager {
        self.conn.clone()
    }

    /// Build a full key with the configured prefix.
    pub fn prefixed_key(&self, key: &str) -> String {
        format!("{}{key}", self.key_prefix)
    }

    /// Return the key prefix.
    pub fn prefix(&self) -> &str {
        &self.key_prefix
    }
}

fn open_client(url: &str) -> AppResult<Client> {
    Client::open(url).map_err(|e| {
        AppError::with_source(
            ErrorKind::Configuration,
            format!("Invalid Redis connection parameters: {e}"),
            e,
        )
    })
}

/// Build the primary connection target from options.
///
/// `url` is returned verbatim when present. Otherwise a URL is assembled
/// from the discrete fields, percent-encoding the credentials.
pub fn connection_url(options: &RedisOptions) -> String {
    if let Some(url) = &options.url {
        return url.clone();
    }

    let scheme = if options.tls { "rediss" } else { "redis" };
    let host = options.host.as_deref().unwrap_or(DEFAULT_HOST);
    let host = if host.contains(':') && !host.starts_with('[') {
        format!("[{host}]")
    } else {
        host.to_string()
    };
    let port = options.port.unwrap_or(DEFAULT_PORT);
    let db = options.db.unwrap_or(0);

    let encode = |s: &str| utf8_percent_encode(s, NON_ALPHANUMERIC).to_string();
    let userinfo = match (&options.username, &options.password) {
        (Some(user), Some(pass)) => format!("{}:{}@", encode(user), encode(pass)),
        (Some(user), None) => format!("{}@", encode(user)),
        (None, Some(pass)) => format!(":{}@", encode(pass)),
        (None, None) => String::new(),
    };

    format!("{scheme}://{userinfo}{host}:{port}/{db}")
}

/// Mask password in Redis URL for safe logging.
pub fn mask_redis_url(url: &str) -> String {
    if let Some(at_pos) = url.rfind('@') {
        let scheme_end = url.find("://").map(|p| p + 3).unwrap_or(0);
        if let Some(colon_pos) = url[..at_pos].rfind(':') {
            if colon_pos >= scheme_end {
                return format!("{}:****@{}", &url[..colon_pos], &url[at_pos + 1..]);
            }
        }
    }
    url.to_string()
}
