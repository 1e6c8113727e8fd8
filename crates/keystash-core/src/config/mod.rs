//! Application configuration schemas.
//!
//! Configuration is deserialized via the `config` crate from an optional
//! TOML file overlaid with `KEYSTASH__*` environment variables.

pub mod logging;
pub mod redis;

use serde::{Deserialize, Serialize};
use tracing::debug;

use self::logging::LoggingConfig;
use self::redis::RedisOptions;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Redis connection options.
    #[serde(default)]
    pub redis: RedisOptions,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// The file is optional. Environment variables prefixed with
    /// `KEYSTASH` and separated by `__` override file values, e.g.
    /// `KEYSTASH__REDIS__URL`.
    pub fn load(path: &str) -> Result<Self, AppError> {
        debug!(path, "Loading configuration");

        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("KEYSTASH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
