//! Options factory trait for deferred configuration.

use async_trait::async_trait;

use crate::config::redis::RedisOptions;
use crate::result::AppResult;

/// A component that produces Redis options at startup.
///
/// Implementors typically read secrets or service discovery results
/// before handing back connection parameters.
#[async_trait]
pub trait RedisOptionsFactory: Send + Sync + 'static {
    /// Produce the options used to construct the Redis client.
    async fn create_redis_options(&self) -> AppResult<RedisOptions>;
}
