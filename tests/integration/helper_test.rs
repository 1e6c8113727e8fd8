//! Integration tests for the cache helper over the in-memory store.

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use keystash::{CacheValue, ErrorKind, KeyExpiry, RedisCacheHelper};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Profile {
    name: String,
    age: u32,
}

#[tokio::test]
async fn test_object_scenario() {
    let cache = helpers::TestCache::memory();
    let profile = Profile {
        name: "a".to_string(),
        age: 3,
    };

    let stored = cache
        .helper
        .set("user:1", CacheValue::json(&profile).unwrap(), None)
        .await
        .unwrap();
    assert!(stored);

    let loaded: Option<Profile> = cache.helper.get_as_object("user:1", None).await.unwrap();
    assert_eq!(loaded, Some(profile));
}

#[tokio::test]
async fn test_flag_expires_scenario() {
    let cache = helpers::TestCache::memory();

    cache
        .helper
        .set("flag", true, Some(1u64.into()))
        .await
        .unwrap();
    assert_eq!(
        cache.helper.get_as_boolean("flag", None).await.unwrap(),
        Some(true)
    );

    tokio::time::sleep(Duration::from_millis(1100)).await;

    assert_eq!(
        cache
            .helper
            .get_as_string("flag", Some("gone".to_string()))
            .await
            .unwrap(),
        Some("gone".to_string())
    );
}

#[tokio::test]
async fn test_thirty_minutes_ttl() {
    let cache = helpers::TestCache::memory();
    cache
        .helper
        .set("session", "token", Some("30m".into()))
        .await
        .unwrap();
    assert_eq!(
        cache.helper.ttl("session").await.unwrap(),
        KeyExpiry::Seconds(1800)
    );
}

#[tokio::test]
async fn test_del_only_counts_existing() {
    let cache = helpers::TestCache::memory();
    cache.helper.set("k1", "v", None).await.unwrap();
    assert_eq!(cache.helper.del(&["k1", "k2"]).await.unwrap(), 1);
}

#[tokio::test]
async fn test_overwrite_changes_decoded_type() {
    let cache = helpers::TestCache::memory();
    cache.helper.set("counter", 10, None).await.unwrap();
    assert_eq!(
        cache.helper.get_as_number("counter", None).await.unwrap(),
        Some(10.0)
    );

    cache.helper.set("counter", "ten", None).await.unwrap();
    let value = cache.helper.get_as_number("counter", None).await.unwrap();
    assert!(value.is_some_and(f64::is_nan));
}

#[tokio::test]
async fn test_write_then_expire_order() {
    let store = Arc::new(helpers::RecordingStore::default());
    let helper = RedisCacheHelper::new(store.clone());

    let acknowledged = helper.set("k", false, Some("2h".into())).await.unwrap();

    // The expiry reply (false here) does not affect the result.
    assert!(acknowledged);
    assert_eq!(store.commands(), vec!["SET k false", "EXPIRE k 7200"]);
}

#[tokio::test]
async fn test_invalid_ttl_sends_nothing() {
    let store = Arc::new(helpers::RecordingStore::default());
    let helper = RedisCacheHelper::new(store.clone());

    let err = helper
        .set("k", "v", Some("not-a-ttl".into()))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::InvalidArgument);
    assert!(store.commands().is_empty());
}

#[tokio::test]
async fn test_oversized_ttl_sends_nothing() {
    let store = Arc::new(helpers::RecordingStore::default());
    let helper = RedisCacheHelper::new(store.clone());

    let err = helper
        .set("k", "v", Some("9999999999999d".into()))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::InvalidArgument);
    assert!(store.commands().is_empty());
}

#[tokio::test]
async fn test_unacknowledged_write() {
    let store = Arc::new(helpers::RecordingStore {
        reject_writes: true,
        ..Default::default()
    });
    let helper = RedisCacheHelper::new(store.clone());

    assert!(!helper.set("k", 1.5, None).await.unwrap());
    assert_eq!(store.commands(), vec!["SET k 1.5"]);
}

#[tokio::test]
async fn test_empty_del_skips_round_trip() {
    let store = Arc::new(helpers::RecordingStore::default());
    let helper = RedisCacheHelper::new(store.clone());

    assert_eq!(helper.del(&[]).await.unwrap(), 0);
    assert!(store.commands().is_empty());
}

#[tokio::test]
async fn test_concurrent_callers_share_one_store() {
    let cache = helpers::TestCache::memory();
    let mut handles = Vec::new();
    for i in 0..16 {
        let helper = cache.helper.clone();
        handles.push(tokio::spawn(async move {
            let key = format!("n:{i}");
            helper.set(&key, i, None).await.unwrap();
            helper.get_as_number(&key, None).await.unwrap()
        }));
    }

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.await.unwrap(), Some(i as f64));
    }
}
