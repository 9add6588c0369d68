mod common;

use booking_sync::clients::CollectionClient;
use booking_sync::lifecycle::{AppStore, StoreConfig};
use booking_sync::model::Credentials;
use serde_json::json;
use std::path::Path;
use sync_framework::local_server::LocalServer;

fn config(server: &LocalServer, state_dir: &Path) -> StoreConfig {
    common::init_tracing();
    StoreConfig {
        api_base_url: server.url(),
        state_dir: state_dir.to_path_buf(),
        buffer_size: 16,
        ..StoreConfig::default()
    }
}

fn reply_login(server: &LocalServer) {
    server.reply_json(
        200,
        json!({
            "token": "t0k3n",
            "user": { "_id": "U1", "name": "Ada", "email": "ada@example.com" }
        }),
    );
}

fn reply_bookings(server: &LocalServer) {
    server.reply_json(200, json!({ "data": [{ "_id": "B1", "status": "pending" }] }));
}

fn credentials() -> Credentials {
    Credentials {
        email: "ada@example.com".into(),
        password: "hunter2".into(),
    }
}

fn authorization(server: &LocalServer) -> Vec<Option<String>> {
    server
        .received()
        .iter()
        .map(|request| request.header("authorization").map(str::to_string))
        .collect()
}

#[tokio::test]
async fn test_requests_follow_the_current_session() {
    let server = LocalServer::start().await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let store = AppStore::connect(&config(&server, dir.path())).await.unwrap();

    reply_login(&server);
    reply_bookings(&server);
    reply_bookings(&server);

    assert!(store.auth.login(credentials()).await.is_succeeded());
    assert!(store.bookings.fetch_all().await.is_succeeded());
    store.auth.logout().await.unwrap();
    assert!(store.bookings.fetch_all().await.is_succeeded());

    let targets: Vec<_> = server.received().into_iter().map(|r| r.target).collect();
    assert_eq!(targets, vec!["/api/users/login", "/api/bookings", "/api/bookings"]);
    assert_eq!(
        authorization(&server),
        vec![None, Some("Bearer t0k3n".to_string()), None]
    );

    store.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_reset_drops_the_token_from_later_requests() {
    let server = LocalServer::start().await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let store = AppStore::connect(&config(&server, dir.path())).await.unwrap();

    reply_login(&server);
    reply_bookings(&server);

    store.auth.login(credentials()).await;
    store.reset().await.unwrap();
    store.bookings.fetch_all().await;

    assert_eq!(authorization(&server), vec![None, None]);
    store.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_restored_session_is_sent_after_restart() {
    let server = LocalServer::start().await.unwrap();
    let dir = tempfile::tempdir().unwrap();

    let store = AppStore::connect(&config(&server, dir.path())).await.unwrap();
    reply_login(&server);
    store.auth.login(credentials()).await;
    store.shutdown().await.unwrap();

    let restarted = AppStore::connect(&config(&server, dir.path())).await.unwrap();
    reply_bookings(&server);
    restarted.bookings.fetch_all().await;

    assert_eq!(
        authorization(&server),
        vec![None, Some("Bearer t0k3n".to_string())]
    );
    restarted.shutdown().await.unwrap();
}
