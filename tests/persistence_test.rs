mod common;

use booking_sync::auth_slice::AuthState;
use booking_sync::clients::CollectionClient;
use booking_sync::lifecycle::{DurableStorage, FileStorage, MemoryStorage, ROOT_KEY};
use booking_sync::model::Credentials;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use sync_framework::mock::MockTransport;
use sync_framework::{Method, SettlementPolicy};

fn credentials() -> Credentials {
    Credentials {
        email: "ada@example.com".into(),
        password: "hunter2".into(),
    }
}

fn expect_login(mock: &MockTransport) {
    mock.expect(Method::POST, "/api/users/login").return_ok(json!({
        "token": "t0k3n",
        "user": { "id": "U1", "name": "Ada", "email": "ada@example.com" }
    }));
}

/// Waits until the persistence gate has written a record containing `needle`.
async fn wait_for_write(storage: &MemoryStorage, needle: &str) {
    for _ in 0..100 {
        if storage.read(ROOT_KEY).unwrap().is_some_and(|raw| raw.contains(needle)) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("record containing {needle} was never written");
}

#[tokio::test]
async fn test_only_auth_survives_a_reload() {
    let storage = Arc::new(MemoryStorage::new());
    let mock = MockTransport::new();
    let store = common::store_with(&mock, storage.clone(), SettlementPolicy::default()).await;

    expect_login(&mock);
    mock.expect(Method::GET, "/api/bookings")
        .return_ok(json!({ "data": [{ "_id": "B1", "status": "pending" }] }));
    mock.expect(Method::POST, "/api/wishlist/P1").return_ok(json!({ "ok": true }));

    assert!(store.auth.login(credentials()).await.is_succeeded());
    store.bookings.fetch_all().await;
    store.wishlist.add("P1").await;
    let before = store.snapshot().await.unwrap();
    assert_eq!(before.bookings.items.len(), 1);
    store.shutdown().await.unwrap();

    // A fresh store over the same storage plays the part of a restarted process
    let mock = MockTransport::new();
    let reloaded = common::store_with(&mock, storage, SettlementPolicy::default()).await;
    let after = reloaded.snapshot().await.unwrap();

    assert_eq!(after.auth, before.auth);
    assert!(after.auth.is_authenticated());
    assert!(after.bookings.items.is_empty());
    assert!(after.wishlist.items.is_empty());
    assert!(after.dashboard.data.is_none());
    assert!(mock.calls().is_empty());

    reloaded.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_old_schema_branches_are_ignored() {
    let storage = Arc::new(MemoryStorage::new().with_record(
        ROOT_KEY,
        r#"{"auth":{"user":null,"token":"old"},"bookings":{"items":[{"id":"B1"}],"loading":true},"wishlist":{"items":["P1"]}}"#,
    ));
    let mock = MockTransport::new();
    let store = common::store_with(&mock, storage, SettlementPolicy::default()).await;

    let state = store.snapshot().await.unwrap();
    assert_eq!(state.auth.token.as_deref(), Some("old"));
    assert!(state.bookings.items.is_empty());
    assert!(!state.bookings.loading);
    assert!(state.wishlist.items.is_empty());

    store.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_corrupt_record_starts_signed_out() {
    let storage = Arc::new(MemoryStorage::new().with_record(ROOT_KEY, "{\"auth\": [1, 2"));
    let mock = MockTransport::new();
    let store = common::store_with(&mock, storage, SettlementPolicy::default()).await;

    assert_eq!(store.auth.state().await.unwrap(), AuthState::default());

    store.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_transient_flags_are_not_persisted() {
    let storage = Arc::new(MemoryStorage::new());
    let mock = MockTransport::new();
    let store = common::store_with(&mock, storage.clone(), SettlementPolicy::default()).await;

    mock.expect(Method::POST, "/api/users/login")
        .return_status(401, json!({ "message": "Invalid credentials" }));
    let outcome = store.auth.login(credentials()).await;
    assert_eq!(outcome.failure(), Some("Invalid credentials"));
    store.shutdown().await.unwrap();

    // Loading and error flips serialize like the initial state, so nothing was written
    assert_eq!(storage.read(ROOT_KEY).unwrap(), None);
}

#[tokio::test]
async fn test_reset_persists_signed_out_state() {
    let storage = Arc::new(MemoryStorage::new());
    let mock = MockTransport::new();
    let store = common::store_with(&mock, storage.clone(), SettlementPolicy::default()).await;

    expect_login(&mock);
    store.auth.login(credentials()).await;
    wait_for_write(&storage, "t0k3n").await;
    store.reset().await.unwrap();
    store.shutdown().await.unwrap();

    let raw = storage.read(ROOT_KEY).unwrap().expect("persisted record");
    assert_eq!(raw, r#"{"auth":{"user":null,"token":null}}"#);

    let reloaded = common::store_with(&mock, storage, SettlementPolicy::default()).await;
    assert!(!reloaded.auth.current().is_authenticated());
    reloaded.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_file_storage_round_trip_across_stores() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(FileStorage::new(dir.path()));
    let mock = MockTransport::new();
    let store = common::store_with(&mock, storage.clone(), SettlementPolicy::default()).await;

    expect_login(&mock);
    store.auth.login(credentials()).await;
    store.shutdown().await.unwrap();

    assert!(dir.path().join("persist_root.json").exists());

    let reloaded = common::store_with(&mock, storage, SettlementPolicy::default()).await;
    let auth = reloaded.auth.current();
    assert_eq!(auth.token.as_deref(), Some("t0k3n"));
    assert_eq!(auth.user.map(|user| user.id).as_deref(), Some("U1"));
    reloaded.shutdown().await.unwrap();
}
