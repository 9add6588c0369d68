mod common;

use booking_sync::wishlist_slice::WishlistStatus;
use serde_json::json;
use sync_framework::mock::MockTransport;
use sync_framework::{Method, TransportError};

fn ids(items: &std::collections::BTreeSet<String>) -> Vec<&str> {
    items.iter().map(String::as_str).collect()
}

#[tokio::test]
async fn test_add_twice_holds_id_once() {
    let mock = MockTransport::new();
    let store = common::store(&mock).await;
    mock.expect(Method::POST, "/api/wishlist/P1").return_ok(json!({ "ok": true }));
    mock.expect(Method::POST, "/api/wishlist/P1").return_ok(json!({ "ok": true }));

    store.wishlist.add("P1").await;
    store.wishlist.add("P1").await;

    let state = store.wishlist.state().await.unwrap();
    assert_eq!(ids(&state.items), vec!["P1"]);
    assert_eq!(state.status, WishlistStatus::Succeeded);
    mock.verify();

    store.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_failed_add_applies_nothing() {
    let mock = MockTransport::new();
    let store = common::store(&mock).await;
    mock.expect(Method::POST, "/api/wishlist/P1")
        .return_err(TransportError::Network("connection reset".into()));

    let outcome = store.wishlist.add("P1").await;
    assert_eq!(outcome.failure(), Some("connection reset"));

    let state = store.wishlist.state().await.unwrap();
    assert!(state.items.is_empty());
    assert_eq!(state.status, WishlistStatus::Failed);

    store.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_remove_absent_id_is_noop() {
    let mock = MockTransport::new();
    let store = common::store(&mock).await;
    mock.expect(Method::GET, "/api/wishlist")
        .return_ok(json!({ "data": ["P1", { "_id": "P2" }, "P1"] }));
    mock.expect(Method::DELETE, "/api/wishlist/P9").return_ok(json!({}));
    mock.expect(Method::DELETE, "/api/wishlist/P1").return_ok(json!({}));

    store.wishlist.fetch().await;
    assert_eq!(ids(&store.wishlist.state().await.unwrap().items), vec!["P1", "P2"]);

    store.wishlist.remove("P9").await;
    let state = store.wishlist.state().await.unwrap();
    assert_eq!(ids(&state.items), vec!["P1", "P2"]);
    assert_eq!(state.error, None);

    store.wishlist.remove("P1").await;
    assert_eq!(ids(&store.wishlist.state().await.unwrap().items), vec!["P2"]);

    store.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_failed_fetch_keeps_confirmed_items() {
    let mock = MockTransport::new();
    let store = common::store(&mock).await;
    mock.expect(Method::POST, "/api/wishlist/P1").return_ok(json!({}));
    mock.expect(Method::GET, "/api/wishlist").return_status(401, json!({}));

    store.wishlist.add("P1").await;
    store.wishlist.fetch().await;

    let state = store.wishlist.state().await.unwrap();
    assert_eq!(ids(&state.items), vec!["P1"]);
    assert_eq!(state.status, WishlistStatus::Failed);
    assert_eq!(
        state.error.as_deref(),
        Some("Request failed with status code 401")
    );

    store.shutdown().await.unwrap();
}
