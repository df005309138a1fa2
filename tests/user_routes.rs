//! End-to-end tests for the user CRUD routes over an in-memory SQLite store.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use sea_orm_migration::MigratorTrait;
use serde_json::{json, Value};
use tower::ServiceExt;

use users_service::create_api_router;
use users_service::infrastructure::database::migrator::Migrator;
use users_service::infrastructure::database::repositories::SeaOrmUserRepository;

async fn app() -> Router {
    // single pooled connection so the in-memory database is shared
    let mut opts = sea_orm::ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1);
    let db = sea_orm::Database::connect(opts).await.expect("connect");
    Migrator::up(&db, None).await.expect("migrate");

    let repo = Arc::new(SeaOrmUserRepository::new(db.clone()));
    create_api_router(repo, db)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn bare_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn crud_lifecycle() {
    let app = app().await;

    // POST /users creates alice with store-assigned id and timestamps
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/users",
            json!({"username": "alice", "password": "p1"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["id"], json!(1));
    assert_eq!(body["data"]["username"], json!("alice"));
    assert!(body["data"]["created_at"].is_string());

    // duplicate username → 409, no second row
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/users",
            json!({"username": "alice", "password": "p2"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));

    // GET /users/1 returns the alice row
    let response = app
        .clone()
        .oneshot(bare_request("GET", "/users/1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["username"], json!("alice"));
    assert_eq!(body["data"]["password"], json!("p1"));

    // PUT /users/1 changes the username, password untouched
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/users/1",
            json!({"username": "alice2"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["username"], json!("alice2"));
    assert_eq!(body["data"]["password"], json!("p1"));

    // DELETE /users/1 succeeds, then the row is gone
    let response = app
        .clone()
        .oneshot(bare_request("DELETE", "/users/1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(bare_request("GET", "/users/1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // deleting again reports nothing removed
    let response = app
        .oneshot(bare_request("DELETE", "/users/1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_fields_are_rejected() {
    let app = app().await;

    let response = app
        .clone()
        .oneshot(json_request("POST", "/users", json!({"username": "alice"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(json_request("POST", "/users", json!({"password": "p1"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_fields_are_rejected() {
    let app = app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/users",
            json!({"username": "", "password": "p1"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn malformed_id_is_a_client_error() {
    let app = app().await;

    for (method, uri) in [
        ("GET", "/users/abc"),
        ("DELETE", "/users/abc"),
    ] {
        let response = app.clone().oneshot(bare_request(method, uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{method} {uri}");
    }

    let response = app
        .oneshot(json_request("PUT", "/users/abc", json!({"username": "x"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_unknown_user_is_not_found() {
    let app = app().await;

    let response = app
        .oneshot(bare_request("GET", "/users/42"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn empty_patch_is_a_noop_update() {
    let app = app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/users",
            json!({"username": "bob", "password": "p2"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(json_request("PUT", "/users/1", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["username"], json!("bob"));
    assert_eq!(body["data"]["password"], json!("p2"));
}

#[tokio::test]
async fn update_collision_is_conflict() {
    let app = app().await;

    for (name, pass) in [("alice", "p1"), ("bob", "p2")] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/users",
                json!({"username": name, "password": pass}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .oneshot(json_request("PUT", "/users/2", json!({"username": "alice"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn health_and_hello_respond() {
    let app = app().await;

    let response = app
        .clone()
        .oneshot(bare_request("GET", "/health"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], json!("ok"));
    assert_eq!(body["database"]["status"], json!("ok"));

    let response = app.oneshot(bare_request("GET", "/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
