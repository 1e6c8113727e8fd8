//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use keystash_cache::redis::RedisClient;
use keystash_cache::redis::client::{connection_url, mask_redis_url};
use keystash_core::config::AppConfig;
use keystash_core::error::AppError;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration with secrets masked
    Show,
    /// Check that the configuration yields a usable connection target
    Validate,
}

/// Execute config commands
pub fn execute(
    args: &ConfigArgs,
    config_path: &str,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            output::print_item(&redacted(config), format);
        }
        ConfigCommand::Validate => {
            RedisClient::validate(&config.redis)?;
            let target = connection_url(&config.redis);
            output::print_success(&format!("Configuration '{}' is valid", config_path));
            output::print_kv("Redis", &mask_redis_url(&target));
            output::print_kv(
                "Key prefix",
                if config.redis.key_prefix.is_empty() {
                    "(none)"
                } else {
                    &config.redis.key_prefix
                },
            );
            output::print_kv("Log level", &config.logging.level);
            if config.redis.url.is_some() && config.redis.has_discrete_identity() {
                output::print_warning("Both url and host/port/credentials are set; url wins");
            }
        }
    }

    Ok(())
}

/// Copy of the configuration with credentials masked for display
fn redacted(config: &AppConfig) -> AppConfig {
    let mut config = config.clone();
    if let Some(url) = config.redis.url.as_mut() {
        *url = mask_redis_url(url);
    }
    if config.redis.password.is_some() {
        config.redis.password = Some("****".to_string());
    }
    config
}
