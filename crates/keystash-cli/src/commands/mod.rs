//! CLI command definitions and dispatch.

pub mod cache;
pub mod config;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use keystash_cache::RedisModule;
use keystash_core::config::AppConfig;
use keystash_core::error::AppError;

/// Keystash: typed Redis cache helper
#[derive(Debug, Parser)]
#[command(name = "keystash", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Store a value
    Set(cache::SetArgs),
    /// Read a value
    Get(cache::GetArgs),
    /// Delete keys
    Del(cache::DelArgs),
    /// Show the remaining lifetime of a key
    Ttl(cache::TtlArgs),
    /// Check that Redis is reachable
    Ping,
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        // Config commands must work without a reachable server.
        if let Commands::Config(args) = &self.command {
            return config::execute(args, &self.config, &config, self.format);
        }

        let module = connect(&config).await?;
        tracing::debug!(command = ?self.command, "Executing cache command");
        match &self.command {
            Commands::Set(args) => cache::set(args, &module).await,
            Commands::Get(args) => cache::get(args, &module, self.format).await,
            Commands::Del(args) => cache::del(args, &module, self.format).await,
            Commands::Ttl(args) => cache::ttl(args, &module, self.format).await,
            Commands::Ping => cache::ping(&module, self.format).await,
            Commands::Config(_) => Ok(()),
        }
    }
}

/// Helper: build the Redis module from loaded configuration
pub async fn connect(config: &AppConfig) -> Result<RedisModule, AppError> {
    RedisModule::for_root(config.redis.clone()).await
}
