//! Integration tests against a live Redis server.
//!
//! Set `KEYSTASH_TEST_REDIS_URL` (e.g. `redis://127.0.0.1:6379/15`) to run
//! them; otherwise each test returns early.

mod helpers;

use std::time::Duration;

use keystash::{
    AppResult, AsyncRedisOptions, CacheValue, ErrorKind, KeyExpiry, RedisModule, RedisOptions,
    RedisOptionsFactory,
};

struct EnvOptions;

#[async_trait::async_trait]
impl RedisOptionsFactory for EnvOptions {
    async fn create_redis_options(&self) -> AppResult<RedisOptions> {
        let url = std::env::var(helpers::REDIS_URL_ENV).unwrap_or_default();
        Ok(RedisOptions::from_url(url).with_key_prefix("keystash-test:class:"))
    }
}

#[tokio::test]
async fn test_typed_roundtrip() {
    let Some(module) = helpers::live_module("typed_roundtrip").await else {
        return;
    };
    let cache = module.cache_helper();

    assert!(cache.set("s", "text", None).await.unwrap());
    assert!(cache.set("n", 12.5, None).await.unwrap());
    assert!(cache.set("b", true, None).await.unwrap());
    assert!(
        cache
            .set("o", CacheValue::from(serde_json::json!({"x": [1, 2]})), None)
            .await
            .unwrap()
    );

    assert_eq!(
        cache.get_as_string("s", None).await.unwrap(),
        Some("text".to_string())
    );
    assert_eq!(cache.get_as_number("n", None).await.unwrap(), Some(12.5));
    assert_eq!(cache.get_as_boolean("b", None).await.unwrap(), Some(true));
    let object: Option<serde_json::Value> = cache.get_as_object("o", None).await.unwrap();
    assert_eq!(object, Some(serde_json::json!({"x": [1, 2]})));

    assert_eq!(cache.del(&["s", "n", "b", "o", "absent"]).await.unwrap(), 4);
}

#[tokio::test]
async fn test_ttl_applied_by_server() {
    let Some(module) = helpers::live_module("ttl_applied").await else {
        return;
    };
    let cache = module.cache_helper();

    cache.set("k", "v", Some("30m".into())).await.unwrap();
    assert_eq!(cache.ttl("k").await.unwrap(), KeyExpiry::Seconds(1800));

    cache.set("k", "v", None).await.unwrap();
    assert_eq!(cache.ttl("k").await.unwrap(), KeyExpiry::Persistent);

    cache.del(&["k"]).await.unwrap();
    assert_eq!(cache.ttl("k").await.unwrap(), KeyExpiry::Missing);
}

#[tokio::test]
async fn test_expiry_elapses() {
    let Some(module) = helpers::live_module("expiry_elapses").await else {
        return;
    };
    let cache = module.cache_helper();

    cache.set("flag", true, Some(1u64.into())).await.unwrap();
    assert_eq!(cache.get_as_boolean("flag", None).await.unwrap(), Some(true));

    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(
        cache
            .get_as_string("flag", Some("gone".to_string()))
            .await
            .unwrap(),
        Some("gone".to_string())
    );
}

#[tokio::test]
async fn test_key_prefix_isolates_keys() {
    let Some(module) = helpers::live_module("prefix").await else {
        return;
    };
    let client = module.client();
    assert!(client.prefix().ends_with(":prefix:"));
    assert!(client.prefixed_key("a").ends_with(":prefix:a"));
    assert!(module.cache_helper().ping().await.unwrap());
}

#[tokio::test]
async fn test_async_class_strategy() {
    if std::env::var(helpers::REDIS_URL_ENV).is_err() {
        return;
    }
    let module = RedisModule::for_root_async(AsyncRedisOptions::new().use_class(EnvOptions))
        .await
        .unwrap();
    assert_eq!(module.client().prefix(), "keystash-test:class:");
    assert!(module.cache_helper().ping().await.unwrap());
}

#[tokio::test]
async fn test_unreachable_server_is_cache_error() {
    if std::env::var(helpers::REDIS_URL_ENV).is_err() {
        return;
    }
    let options = RedisOptions::from_host("127.0.0.1", 1).with_connect_timeout_ms(500);
    let err = RedisModule::for_root(options).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Cache);
}
