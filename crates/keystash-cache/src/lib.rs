//! # keystash-cache
//!
//! Typed cache helper over a string key-value store, plus the wiring that
//! resolves configuration and builds the shared Redis client.
//!
//! - **helper**: [`RedisCacheHelper`], typed `set`/`del`/`get_as_*` operations
//! - **resolver**: [`ConfigSource`], direct, factory, or instance-provided options
//! - **module**: [`RedisModule`], resolves options once and owns the client and helper
//! - **redis**: Redis-backed store using the [redis](https://crates.io/crates/redis) crate
//! - **memory**: in-process store using [moka](https://crates.io/crates/moka)

pub mod helper;
#[cfg(feature = "memory")]
pub mod memory;
#[cfg(feature = "redis-backend")]
pub mod module;
#[cfg(feature = "redis-backend")]
pub mod redis;
pub mod resolver;

pub use helper::{CacheValue, RedisCacheHelper};
#[cfg(feature = "redis-backend")]
pub use module::RedisModule;
pub use resolver::{AsyncRedisOptions, ConfigSource};
