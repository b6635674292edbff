//! Wire-level tests for the HTTP clients against a mock server.

use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use aisle_client::{
    ClientConfig, Credentials, Filter, HttpIdentityClient, HttpRecordStore, IdentityError,
    IdentityService, Ordering, RecordStore,
};

fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig {
        identity_base_url: server.uri(),
        store_base_url: server.uri(),
        api_key: "anon-key".to_string(),
        timeout_secs: 5,
    }
}

// ─── Identity ───────────────────────────────────────────────────────

#[tokio::test]
async fn sign_in_posts_credentials_and_parses_the_session() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(query_param("grant_type", "password"))
        .and(header("apikey", "anon-key"))
        .and(body_json(json!({
            "email": "ada@example.com",
            "password": "s3cret-pw",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "jwt-abc",
            "token_type": "bearer",
            "expires_in": 3600,
            "user": { "id": user_id, "email": "ada@example.com" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpIdentityClient::new(&config_for(&server)).unwrap();
    let session = client
        .sign_in(&Credentials::new("ada@example.com", "s3cret-pw"))
        .await
        .unwrap();
    assert_eq!(session.access_token, "jwt-abc");
    assert_eq!(session.user.email, "ada@example.com");
}

#[tokio::test]
async fn sign_in_maps_4xx_to_invalid_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error_description": "Invalid login credentials"
        })))
        .mount(&server)
        .await;

    let client = HttpIdentityClient::new(&config_for(&server)).unwrap();
    let err = client
        .sign_in(&Credentials::new("ada@example.com", "wrong"))
        .await
        .unwrap_err();
    match err {
        IdentityError::InvalidCredentials { detail } => {
            assert_eq!(detail, "Invalid login credentials");
        }
        other => panic!("expected InvalidCredentials, got {other:?}"),
    }
}

#[tokio::test]
async fn current_user_sends_the_bearer_token() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();
    Mock::given(method("GET"))
        .and(path("/user"))
        .and(header("authorization", "Bearer jwt-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": user_id,
            "email": "ada@example.com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpIdentityClient::new(&config_for(&server)).unwrap();
    let user = client.current_user("jwt-abc").await.unwrap();
    assert_eq!(user.email, "ada@example.com");
}

#[tokio::test]
async fn current_user_maps_401_to_unauthenticated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "msg": "JWT expired"
        })))
        .mount(&server)
        .await;

    let client = HttpIdentityClient::new(&config_for(&server)).unwrap();
    let err = client.current_user("stale").await.unwrap_err();
    assert!(err.is_auth_failure());
}

#[tokio::test]
async fn sign_up_carries_the_redirect_target() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/signup"))
        .and(query_param("redirect_to", "https://app.example.com/protected"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpIdentityClient::new(&config_for(&server)).unwrap();
    client
        .sign_up(
            &Credentials::new("ada@example.com", "s3cret-pw"),
            "https://app.example.com/protected",
        )
        .await
        .unwrap();
}

// ─── Record store ───────────────────────────────────────────────────

#[tokio::test]
async fn select_builds_owner_filter_and_ordering() {
    let server = MockServer::start().await;
    let owner = Uuid::new_v4();
    Mock::given(method("GET"))
        .and(path("/wedding_guests"))
        .and(query_param("user_id", format!("eq.{owner}")))
        .and(query_param("order", "created_at.desc"))
        .and(header("apikey", "anon-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "g1", "name": "Ada" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let store = HttpRecordStore::new(&config_for(&server)).unwrap();
    let rows = store
        .select(
            "wedding_guests",
            &Filter::new().eq("user_id", owner),
            Some(&Ordering::desc("created_at")),
        )
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Ada");
}

#[tokio::test]
async fn insert_asks_for_the_stored_representation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/vendors"))
        .and(header("Prefer", "return=representation"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            { "id": "v1", "name": "Bloom & Co", "status": "Researching" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let store = HttpRecordStore::new(&config_for(&server)).unwrap();
    let rows = store
        .insert("vendors", vec![json!({ "name": "Bloom & Co" })])
        .await
        .unwrap();
    assert_eq!(rows[0]["id"], "v1");
}

#[tokio::test]
async fn delete_filters_on_id_and_owner() {
    let server = MockServer::start().await;
    let owner = Uuid::new_v4();
    Mock::given(method("DELETE"))
        .and(path("/wedding_guests"))
        .and(query_param("id", "eq.g1"))
        .and(query_param("user_id", format!("eq.{owner}")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let store = HttpRecordStore::new(&config_for(&server)).unwrap();
    store
        .delete(
            "wedding_guests",
            &Filter::new().eq("id", "g1").eq("user_id", owner),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn non_2xx_surfaces_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let store = HttpRecordStore::new(&config_for(&server)).unwrap();
    let err = store
        .update("tasks", &Filter::new().eq("id", "t1"), json!({ "completed": true }))
        .await
        .unwrap_err();
    let rendered = err.to_string();
    assert!(rendered.contains("tasks"));
    assert!(rendered.contains("503"));
}
