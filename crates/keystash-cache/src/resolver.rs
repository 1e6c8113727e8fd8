//! Configuration resolution for the Redis client.
//!
//! Options come from exactly one source: a direct value, an async factory
//! (optionally fed upstream dependencies), or an options-factory instance.
//! [`ConfigSource::resolve`] runs the chosen source once at startup.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;

use keystash_core::config::redis::RedisOptions;
use keystash_core::error::AppError;
use keystash_core::result::AppResult;
use keystash_core::traits::options::RedisOptionsFactory;

/// Future returned by an options factory.
pub type OptionsFuture = BoxFuture<'static, AppResult<RedisOptions>>;

/// A one-shot async function producing options.
pub type OptionsFn = Box<dyn FnOnce() -> OptionsFuture + Send>;

fn boxed_factory<F, Fut>(factory: F) -> OptionsFn
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = AppResult<RedisOptions>> + Send + 'static,
{
    Box::new(move || factory().boxed())
}

/// Where the Redis options come from.
pub enum ConfigSource {
    /// Options supplied up front.
    Direct(RedisOptions),
    /// Options produced by an async function.
    Factory(OptionsFn),
    /// Options produced by a factory object.
    Instance(Arc<dyn RedisOptionsFactory>),
}

impl ConfigSource {
    /// Resolve options with an async function.
    pub fn factory<F, Fut>(factory: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = AppResult<RedisOptions>> + Send + 'static,
    {
        Self::Factory(boxed_factory(factory))
    }

    /// Resolve options with an async function that receives `deps`.
    ///
    /// Pass several dependencies as a tuple; they reach the factory in
    /// the same positions.
    pub fn factory_with<D, F, Fut>(deps: D, factory: F) -> Self
    where
        D: Send + 'static,
        F: FnOnce(D) -> Fut + Send + 'static,
        Fut: Future<Output = AppResult<RedisOptions>> + Send + 'static,
    {
        Self::factory(move || factory(deps))
    }

    /// Resolve options with a factory object owned by the source.
    pub fn instance<T: RedisOptionsFactory>(factory: T) -> Self {
        Self::Instance(Arc::new(factory))
    }

    /// Resolve options with a factory object shared with the caller.
    pub fn existing(factory: Arc<dyn RedisOptionsFactory>) -> Self {
        Self::Instance(factory)
    }

    /// Name of the resolution strategy, for logging.
    pub fn strategy(&self) -> &'static str {
        match self {
            Self::Direct(_) => "direct",
            Self::Factory(_) => "factory",
            Self::Instance(_) => "instance",
        }
    }

    /// Run the source and return the resolved options.
    pub async fn resolve(self) -> AppResult<RedisOptions> {
        match self {
            Self::Direct(options) => Ok(options),
            Self::Factory(factory) => factory().await,
            Self::Instance(factory) => factory.create_redis_options().await,
        }
    }
}

impl fmt::Debug for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct(options) => f.debug_tuple("Direct").field(options).finish(),
            Self::Factory(_) => f.write_str("Factory(..)"),
            Self::Instance(_) => f.write_str("Instance(..)"),
        }
    }
}

impl From<RedisOptions> for ConfigSource {
    fn from(options: RedisOptions) -> Self {
        Self::Direct(options)
    }
}

/// Deferred options registration.
///
/// Exactly one of `use_existing`, `use_class` or `use_factory` must be set.
/// Converting into a [`ConfigSource`] fails with a `Configuration` error
/// otherwise.
#[derive(Default)]
pub struct AsyncRedisOptions {
    use_existing: Option<Arc<dyn RedisOptionsFactory>>,
    use_class: Option<Arc<dyn RedisOptionsFactory>>,
    use_factory: Option<OptionsFn>,
}

impl AsyncRedisOptions {
    /// Start with no strategy selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an options factory the caller already holds.
    pub fn use_existing(mut self, factory: Arc<dyn RedisOptionsFactory>) -> Self {
        self.use_existing = Some(factory);
        self
    }

    /// Use a new options factory, owned by the resolved source.
    pub fn use_class<T: RedisOptionsFactory>(mut self, factory: T) -> Self {
        self.use_class = Some(Arc::new(factory));
        self
    }

    /// Use an async function.
    pub fn use_factory<F, Fut>(mut self, factory: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = AppResult<RedisOptions>> + Send + 'static,
    {
        self.use_factory = Some(boxed_factory(factory));
        self
    }

    /// Use an async function that receives `deps`.
    pub fn use_factory_with<D, F, Fut>(self, deps: D, factory: F) -> Self
    where
        D: Send + 'static,
        F: FnOnce(D) -> Fut + Send + 'static,
        Fut: Future<Output = AppResult<RedisOptions>> + Send + 'static,
    {
        self.use_factory(move || factory(deps))
    }
}

impl TryFrom<AsyncRedisOptions> for ConfigSource {
    type Error = AppError;

    fn try_from(options: AsyncRedisOptions) -> Result<Self, Self::Error> {
        let AsyncRedisOptions {
            use_existing,
            use_class,
            use_factory,
        } = options;

        match (use_existing, use_class, use_factory) {
            (Some(existing), None, None) => Ok(Self::Instance(existing)),
            (None, Some(class), None) => Ok(Self::Instance(class)),
            (None, None, Some(factory)) => Ok(Self::Factory(factory)),
            (None, None, None) => Err(AppError::configuration(
                "Async Redis options need one of use_existing, use_class or use_factory",
            )),
            _ => Err(AppError::configuration(
                "Async Redis options accept only one of use_existing, use_class or use_factory",
            )),
        }
    }
}
