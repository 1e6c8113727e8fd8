//! # keystash
//!
//! Typed Redis cache helper. Resolve options from a [`ConfigSource`], build
//! a [`RedisModule`] once at startup, and hand its [`RedisCacheHelper`] to
//! the code that reads and writes the cache.
//!
//! ```no_run
//! use keystash::{RedisModule, RedisOptions};
//!
//! # async fn run() -> keystash::AppResult<()> {
//! let module = RedisModule::for_root(RedisOptions::from_url("redis://127.0.0.1:6379/0")).await?;
//! let cache = module.cache_helper();
//! cache.set("flag", true, Some("30m".into())).await?;
//! assert_eq!(cache.get_as_boolean("flag", None).await?, Some(true));
//! # Ok(())
//! # }
//! ```

pub use keystash_cache::helper::{CacheValue, RedisCacheHelper};
pub use keystash_cache::memory::MemoryStore;
pub use keystash_cache::redis::RedisClient;
pub use keystash_cache::resolver::{AsyncRedisOptions, ConfigSource};
pub use keystash_cache::RedisModule;
pub use keystash_core::config::redis::RedisOptions;
pub use keystash_core::error::{AppError, ErrorKind};
pub use keystash_core::result::AppResult;
pub use keystash_core::traits::{KeyExpiry, KeyValueStore, RedisOptionsFactory};
pub use keystash_core::ttl::TtlSpec;
