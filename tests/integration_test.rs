mod common;

use booking_sync::clients::CollectionClient;
use booking_sync::lifecycle::AppState;
use booking_sync::model::{Credentials, PublicPropertyCreate, UserCreate, UserUpdate};
use booking_sync::property_slice::PropertyAction;
use serde_json::json;
use sync_framework::mock::MockTransport;
use sync_framework::{AsyncOutcome, Method};

#[tokio::test]
async fn test_full_store_lifecycle() {
    let mock = MockTransport::new();
    let store = common::store(&mock).await;

    // 1. Sign in
    mock.expect(Method::POST, "/api/users/login").return_ok(json!({
        "data": {
            "token": "t0k3n",
            "user": { "_id": "U1", "name": "Ada", "email": "ada@example.com", "role": "admin" }
        }
    }));
    let session = store
        .auth
        .login(Credentials {
            email: "ada@example.com".into(),
            password: "hunter2".into(),
        })
        .await
        .succeeded()
        .expect("login should succeed");
    assert_eq!(session.user.id, "U1");

    // 2. Edit own profile
    mock.expect(Method::PATCH, "/api/users/U1")
        .return_ok(json!({ "user": { "_id": "U1", "name": "Ada L.", "email": "ada@example.com" } }));
    store
        .auth
        .update_profile(UserUpdate {
            name: Some("Ada L.".into()),
            ..Default::default()
        })
        .await;
    let auth = store.auth.state().await.unwrap();
    assert_eq!(auth.user.and_then(|user| user.name).as_deref(), Some("Ada L."));

    // 3. Admin screens
    mock.expect(Method::GET, "/api/users")
        .return_ok(json!({ "data": [{ "_id": "U1" }, { "_id": "U2" }] }));
    mock.expect(Method::POST, "/api/users/signup")
        .return_ok(json!({ "user": { "_id": "U3", "name": "Grace" } }));
    mock.expect(Method::GET, "/api/properties")
        .return_ok(json!({ "properties": [{ "_id": "P1", "title": "Loft" }] }));
    mock.expect(Method::PATCH, "/api/properties/P1/verify")
        .return_ok(json!({ "property": { "_id": "P1", "title": "Loft", "isVerified": true } }));
    mock.expect(Method::POST, "/api/public-properties")
        .return_ok(json!({ "data": { "_id": "PP1", "title": "Cabin", "price": 120.0 } }));

    store.users.fetch_all().await;
    store
        .users
        .create(UserCreate {
            name: "Grace".into(),
            email: "grace@example.com".into(),
            password: "secret".into(),
            role: None,
        })
        .await;
    store.properties.fetch_all().await;
    let verified = store.properties.perform_action("P1", PropertyAction::Verify).await;
    assert!(matches!(verified, AsyncOutcome::Succeeded(ref p) if p.verified));
    store
        .public_properties
        .create(PublicPropertyCreate {
            title: "Cabin".into(),
            location: "Lake".into(),
            price: 120.0,
        })
        .await;

    // 4. Snapshot
    let state = store.snapshot().await.unwrap();
    let user_ids: Vec<_> = state.users.items.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(user_ids, vec!["U1", "U2", "U3"]);
    assert!(state.properties.items[0].verified);
    assert_eq!(state.public_properties.items[0].id, "PP1");
    assert!(state.auth.is_authenticated());
    assert!(state.employees.items.is_empty());
    mock.verify();

    // 5. Reset returns every branch to its initial shape
    store.reset().await.unwrap();
    let state = store.snapshot().await.unwrap();
    assert_eq!(state, fresh_state(&MockTransport::new()).await);

    // 6. Shutdown
    store.shutdown().await.unwrap();
}

async fn fresh_state(mock: &MockTransport) -> AppState {
    let store = common::store(mock).await;
    let state = store.snapshot().await.unwrap();
    store.shutdown().await.unwrap();
    state
}

#[tokio::test]
async fn test_update_profile_without_session_fails() {
    let mock = MockTransport::new();
    let store = common::store(&mock).await;

    let outcome = store.auth.update_profile(UserUpdate::default()).await;
    assert_eq!(outcome.failure(), Some("Not signed in"));
    assert!(mock.calls().is_empty());

    store.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_branches_do_not_share_state() {
    let mock = MockTransport::new();
    let store = common::store(&mock).await;
    mock.expect(Method::GET, "/api/users?role=employee")
        .return_ok(json!({ "users": [{ "_id": "E1", "role": "employee" }] }));

    store.employees.fetch_all().await;

    let state = store.snapshot().await.unwrap();
    assert_eq!(state.employees.items.len(), 1);
    assert!(state.users.items.is_empty());
    assert!(!state.users.loading);

    store.shutdown().await.unwrap();
}
