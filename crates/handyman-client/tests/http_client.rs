use std::sync::Arc;
use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;

use handyman_client::session::{REFRESH_TOKEN_KEY, TOKEN_KEY, USER_KEY};
use handyman_client::types::{LoginRequest, OrderStatus, ServiceQuery};
use handyman_client::{
    ApiClient, ClientConfig, ClientError, MemoryStorage, ReqwestTransport, SqliteStorage, Storage,
};

fn client_for(server: &MockServer, storage: Arc<dyn Storage>) -> ApiClient {
    let config = ClientConfig::new(server.base_url());
    ApiClient::new(config, storage, Arc::new(ReqwestTransport::new()))
}

fn user_json() -> serde_json::Value {
    json!({
        "user_id": 1,
        "username": "alice",
        "email": "alice@example.com",
        "phone": "13800138000",
        "user_type": "customer",
        "is_verified": true,
        "balance": 0.0,
        "status": "active"
    })
}

#[tokio::test]
async fn login_then_authenticated_profile_call() {
    let server = MockServer::start();
    let login = server.mock(|when, then| {
        when.method(POST)
            .path("/users/login")
            .header("content-type", "application/json")
            .json_body(json!({ "identifier": "alice", "password": "secret" }));
        then.status(200).json_body(json!({
            "code": 200,
            "msg": "ok",
            "data": { "token": "t1", "refresh_token": "r1", "user": user_json() }
        }));
    });
    let profile = server.mock(|when, then| {
        when.method(GET)
            .path("/users/profile")
            .header("authorization", "Bearer t1");
        then.status(200)
            .json_body(json!({ "code": 200, "data": user_json() }));
    });

    let dir = std::env::temp_dir().join(format!("handyman-it-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let storage = Arc::new(SqliteStorage::open(&dir.join("session.db")).unwrap());
    let client = client_for(&server, storage.clone());

    let result = client
        .users()
        .login(&LoginRequest {
            identifier: "alice".into(),
            password: "secret".into(),
        })
        .await
        .unwrap();
    assert_eq!(result.user.username, "alice");
    assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some("t1"));
    assert_eq!(storage.get(REFRESH_TOKEN_KEY).unwrap().as_deref(), Some("r1"));
    assert!(storage.get(USER_KEY).unwrap().is_some());

    let user = client.users().get_user_info().await.unwrap();
    assert_eq!(user.user_id, 1);

    login.assert();
    profile.assert();
    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn services_query_reaches_the_server() {
    let server = MockServer::start();
    let services = server.mock(|when, then| {
        when.method(GET)
            .path("/services")
            .query_param("category_id", "3")
            .query_param("page", "2")
            .query_param("page_size", "5");
        then.status(200).json_body(json!({
            "code": 200,
            "data": { "services": [], "total": 6, "page": 2, "page_size": 5 }
        }));
    });

    let client = client_for(&server, Arc::new(MemoryStorage::new()));
    let page = client
        .services()
        .get_services(&ServiceQuery {
            category_id: Some(3),
            page: Some(2),
            page_size: Some(5),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(page.total, 6);
    assert_eq!(page.page_size, 5);
    services.assert();
}

#[tokio::test]
async fn server_message_is_surfaced() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(PUT).path("/orders/9/status");
        then.status(422)
            .json_body(json!({ "code": 422, "msg": "cannot reopen a cancelled order" }));
    });

    let client = client_for(&server, Arc::new(MemoryStorage::new()));
    let err = client
        .orders()
        .update_order_status(9, OrderStatus::Pending)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Http { status: 422, .. }));
    assert_eq!(err.message(), "cannot reopen a cancelled order");
}

#[tokio::test]
async fn empty_body_is_an_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/orders/1");
        then.status(200);
    });

    let client = client_for(&server, Arc::new(MemoryStorage::new()));
    let err = client.orders().get_order_by_id(1).await.unwrap_err();

    assert!(matches!(err, ClientError::EmptyResponse));
}

#[tokio::test]
async fn logout_clears_session_even_when_server_fails() {
    let server = MockServer::start();
    let logout = server.mock(|when, then| {
        when.method(POST)
            .path("/users/logout")
            .json_body(json!({ "refresh_token": "r1" }));
        then.status(500).body("Internal Server Error");
    });

    let storage = Arc::new(MemoryStorage::new());
    storage.set(TOKEN_KEY, "t1").unwrap();
    storage.set(REFRESH_TOKEN_KEY, "r1").unwrap();
    storage.set(USER_KEY, "{}").unwrap();
    let client = client_for(&server, storage.clone());

    client.users().logout().await;

    assert!(storage.is_empty());
    logout.assert();
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    // Nothing listens on port 9 locally.
    let config = ClientConfig::new("http://127.0.0.1:9");
    let client = ApiClient::new(
        config,
        Arc::new(MemoryStorage::new()),
        Arc::new(ReqwestTransport::new()),
    );

    let err = client.services().get_categories().await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
}

#[tokio::test]
async fn mock_mode_answers_without_the_network() {
    let server = MockServer::start();
    let never = server.mock(|when, then| {
        when.path("/services/categories");
        then.status(500);
    });

    let config = ClientConfig::new(server.base_url())
        .with_mocks(true)
        .with_mock_delay(Duration::ZERO);
    let storage = Arc::new(MemoryStorage::new());
    let client = ApiClient::new(config, storage.clone(), Arc::new(ReqwestTransport::new()));

    let categories = client.services().get_categories().await.unwrap();
    assert_eq!(categories.len(), 8);

    let bad = client
        .users()
        .login(&LoginRequest {
            identifier: "demo".into(),
            password: "wrong".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(bad.message(), "wrong password");

    client
        .users()
        .login(&LoginRequest {
            identifier: "demo".into(),
            password: handyman_client::mock::MOCK_PASSWORD.into(),
        })
        .await
        .unwrap();
    assert!(storage.get(TOKEN_KEY).unwrap().unwrap().starts_with("mock-token-"));

    never.assert_calls(0);
}
