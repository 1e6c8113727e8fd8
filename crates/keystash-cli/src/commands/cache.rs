//! Cache read/write commands.

use clap::{Args, ValueEnum};

use crate::output::{self, OutputFormat};
use keystash_cache::{CacheValue, RedisModule};
use keystash_core::error::AppError;
use keystash_core::traits::store::KeyExpiry;
use keystash_core::ttl::TtlSpec;

/// How a value is encoded on write or decoded on read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ValueKind {
    /// Plain text
    #[default]
    String,
    /// Decimal number
    Number,
    /// `true` / `false`
    Bool,
    /// JSON document
    Json,
}

/// Arguments for `set`
#[derive(Debug, Args)]
pub struct SetArgs {
    /// Key to write
    pub key: String,

    /// Value to store
    pub value: String,

    /// How to interpret the value
    #[arg(short, long, value_enum, default_value = "string")]
    pub kind: ValueKind,

    /// Time to live: seconds, or a number with m/h/d (e.g. 30m)
    #[arg(short, long)]
    pub ttl: Option<String>,
}

/// Arguments for `get`
#[derive(Debug, Args)]
pub struct GetArgs {
    /// Key to read
    pub key: String,

    /// How to decode the stored value
    #[arg(long = "as", value_enum, default_value = "string")]
    pub kind: ValueKind,

    /// Value to return when the key is missing
    #[arg(short, long)]
    pub default: Option<String>,
}

/// Arguments for `del`
#[derive(Debug, Args)]
pub struct DelArgs {
    /// Keys to delete
    #[arg(required = true)]
    pub keys: Vec<String>,
}

/// Arguments for `ttl`
#[derive(Debug, Args)]
pub struct TtlArgs {
    /// Key to inspect
    pub key: String,
}

/// Parse CLI text into a cache value of the requested kind
pub fn parse_value(raw: &str, kind: ValueKind) -> Result<CacheValue, AppError> {
    match kind {
        ValueKind::String => Ok(CacheValue::from(raw)),
        ValueKind::Number => parse_number(raw).map(CacheValue::Number),
        ValueKind::Bool => parse_bool(raw).map(CacheValue::Bool),
        ValueKind::Json => parse_json(raw).map(CacheValue::Object),
    }
}

fn parse_number(raw: &str) -> Result<f64, AppError> {
    raw.trim()
        .parse()
        .map_err(|e| AppError::invalid_argument(format!("'{raw}' is not a number: {e}")))
}

fn parse_bool(raw: &str) -> Result<bool, AppError> {
    raw.parse()
        .map_err(|e| AppError::invalid_argument(format!("'{raw}' is not a boolean: {e}")))
}

fn parse_json(raw: &str) -> Result<serde_json::Value, AppError> {
    serde_json::from_str(raw)
        .map_err(|e| AppError::invalid_argument(format!("'{raw}' is not valid JSON: {e}")))
}

/// Execute `set`
pub async fn set(args: &SetArgs, module: &RedisModule) -> Result<(), AppError> {
    let value = parse_value(&args.value, args.kind)?;
    let ttl = args.ttl.clone().map(TtlSpec::from);

    let acknowledged = module.cache_helper().set(&args.key, value, ttl).await?;
    if acknowledged {
        output::print_success(&format!("Stored '{}'", args.key));
    } else {
        output::print_warning(&format!("Write of '{}' was not acknowledged", args.key));
    }
    Ok(())
}

/// Execute `get`
pub async fn get(
    args: &GetArgs,
    module: &RedisModule,
    format: OutputFormat,
) -> Result<(), AppError> {
    let helper = module.cache_helper();
    let default = args.default.as_deref();

    match args.kind {
        ValueKind::String => {
            let value = helper
                .get_as_string(&args.key, default.map(str::to_string))
                .await?;
            output::print_optional(value.as_ref(), format);
        }
        ValueKind::Number => {
            let default = default.map(parse_number).transpose()?;
            let value = helper.get_as_number(&args.key, default).await?;
            output::print_optional(value.as_ref(), format);
        }
        ValueKind::Bool => {
            let default = default.map(parse_bool).transpose()?;
            let value = helper.get_as_boolean(&args.key, default).await?;
            output::print_optional(value.as_ref(), format);
        }
        ValueKind::Json => {
            let default = default.map(parse_json).transpose()?;
            let value = helper.get_as_object(&args.key, default).await?;
            output::print_optional(value.as_ref(), format);
        }
    }
    Ok(())
}

/// Execute `del`
pub async fn del(
    args: &DelArgs,
    module: &RedisModule,
    format: OutputFormat,
) -> Result<(), AppError> {
    let keys: Vec<&str> = args.keys.iter().map(String::as_str).collect();
    let removed = module.cache_helper().del(&keys).await?;
    output::print_value(&removed, format);
    Ok(())
}

/// Execute `ttl`
pub async fn ttl(
    args: &TtlArgs,
    module: &RedisModule,
    format: OutputFormat,
) -> Result<(), AppError> {
    let expiry = module.cache_helper().ttl(&args.key).await?;
    match format {
        OutputFormat::Text => match expiry {
            KeyExpiry::Missing => println!("(missing)"),
            KeyExpiry::Persistent => println!("(no expiry)"),
            KeyExpiry::Seconds(s) => println!("{s}s"),
        },
        OutputFormat::Json => {
            let reply = match expiry {
                KeyExpiry::Missing => -2,
                KeyExpiry::Persistent => -1,
                KeyExpiry::Seconds(s) => i64::try_from(s).unwrap_or(i64::MAX),
            };
            output::print_value(&reply, format);
        }
    }
    Ok(())
}

/// Execute `ping`
pub async fn ping(module: &RedisModule, format: OutputFormat) -> Result<(), AppError> {
    let alive = module.cache_helper().ping().await?;
    match format {
        OutputFormat::Text if alive => println!("PONG"),
        OutputFormat::Text => output::print_warning("Unexpected PING reply"),
        OutputFormat::Json => output::print_value(&alive, format),
    }
    Ok(())
}
