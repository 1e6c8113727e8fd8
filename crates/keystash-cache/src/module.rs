//! Composition root: resolves options once and owns the shared client.

use std::sync::Arc;

use tracing::info;

use keystash_core::config::redis::RedisOptions;
use keystash_core::result::AppResult;

use crate::helper::RedisCacheHelper;
use crate::redis::RedisClient;
use crate::resolver::{AsyncRedisOptions, ConfigSource};

/// The shared Redis client and the cache helper wrapping it.
///
/// Built once at startup. Clone the [`Arc`] from [`RedisModule::client`]
/// or the helper to hand them to request handlers.
#[derive(Debug, Clone)]
pub struct RedisModule {
    client: Arc<RedisClient>,
    helper: RedisCacheHelper,
}

impl RedisModule {
    /// Build from options supplied up front.
    pub async fn for_root(options: RedisOptions) -> AppResult<Self> {
        Self::from_source(ConfigSource::Direct(options)).await
    }

    /// Build from deferred options.
    ///
    /// Fails with a `Configuration` error unless exactly one strategy is set.
    pub async fn for_root_async(options: AsyncRedisOptions) -> AppResult<Self> {
        let source = ConfigSource::try_from(options)?;
        Self::from_source(source).await
    }

    /// Resolve `source`, connect, and wrap the client in a helper.
    pub async fn from_source(source: ConfigSource) -> AppResult<Self> {
        info!(strategy = source.strategy(), "Resolving Redis options");
        let options = source.resolve().await?;

        let client = Arc::new(RedisClient::connect(&options).await?);
        let helper = RedisCacheHelper::new(client.clone());

        Ok(Self { client, helper })
    }

    /// The shared client handle.
    pub fn client(&self) -> Arc<RedisClient> {
        self.client.clone()
    }

    /// The cache helper bound to the shared client.
    pub fn cache_helper(&self) -> &RedisCacheHelper {
        &self.helper
    }
}
