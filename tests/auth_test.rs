use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::env;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;
use tower::ServiceExt;

use shortbot::database::{init_db, AppState};
use shortbot::route::create_app;

// Mutex to ensure tests that modify env vars don't run in parallel
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn setup_test_app() -> (axum::Router, NamedTempFile) {
    let temp_db = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = temp_db.path().to_str().unwrap();
    let db = init_db(db_path).expect("Failed to initialize test database");
    let state = AppState {
        db: Arc::new(db),
        bot_username: "shortbot_test".to_string(),
    };
    (create_app(state), temp_db)
}

/// Helper function to parse response body as JSON
async fn response_json(body: Body) -> Value {
    let bytes = body
        .collect()
        .await
        .expect("Failed to read response body")
        .to_bytes();

    serde_json::from_slice(&bytes).expect("Failed to parse JSON")
}

fn start_update() -> Value {
    json!({
        "update_id": 1,
        "message": {
            "chat": { "id": 1 },
            "from": { "id": 1, "first_name": "Test" },
            "text": "/start"
        }
    })
}

fn webhook_request(secret_header: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("content-type", "application/json");
    if let Some(secret) = secret_header {
        builder = builder.header("X-Telegram-Bot-Api-Secret-Token", secret);
    }
    builder.body(Body::from(start_update().to_string())).unwrap()
}

#[tokio::test]
async fn test_webhook_secret_enabled_valid_token() {
    let _guard = ENV_MUTEX.lock().unwrap();
    env::set_var("WEBHOOK_SECRET", "secret_token");

    let (app, _temp_db) = setup_test_app();

    let response = app.oneshot(webhook_request(Some("secret_token"))).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response.into_body()).await;
    assert_eq!(body["method"], "sendMessage");

    env::remove_var("WEBHOOK_SECRET");
}

#[tokio::test]
async fn test_webhook_secret_enabled_invalid_token() {
    let _guard = ENV_MUTEX.lock().unwrap();
    env::set_var("WEBHOOK_SECRET", "secret_token");

    let (app, _temp_db) = setup_test_app();

    let response = app.oneshot(webhook_request(Some("wrong_token"))).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = response_json(response.into_body()).await;
    assert_eq!(body["error"], "Unauthorized");
    assert_eq!(body["message"], "Invalid or missing webhook secret token");

    env::remove_var("WEBHOOK_SECRET");
}

#[tokio::test]
async fn test_webhook_secret_enabled_no_token() {
    let _guard = ENV_MUTEX.lock().unwrap();
    env::set_var("WEBHOOK_SECRET", "secret_token");

    let (app, _temp_db) = setup_test_app();

    let response = app.oneshot(webhook_request(None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = response_json(response.into_body()).await;
    assert_eq!(body["error"], "Unauthorized");
    assert_eq!(body["message"], "Invalid or missing webhook secret token");

    env::remove_var("WEBHOOK_SECRET");
}

#[tokio::test]
async fn test_webhook_secret_disabled() {
    let _guard = ENV_MUTEX.lock().unwrap();
    env::remove_var("WEBHOOK_SECRET");

    let (app, _temp_db) = setup_test_app();

    let response = app.oneshot(webhook_request(None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
