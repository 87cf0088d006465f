//! Persistence tests
//!
//! A store opened on a data directory must serve the same catalog after
//! being dropped and reopened.

mod common;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use common::{app_with_store, message, send, send_raw};
use film_catalog::models::catalog_schemas;
use film_catalog::storage::MemoryStore;
use serde_json::json;
use tempfile::TempDir;

// =============================================================================
// Reopen
// =============================================================================

/// Created, updated and deleted records survive a restart as left.
#[tokio::test]
async fn test_catalog_survives_reopen() {
    let tmp = TempDir::new().unwrap();

    let film_id = {
        let store = Arc::new(MemoryStore::open(tmp.path(), catalog_schemas()).unwrap());
        let app = app_with_store(store);

        let (_, film) = send(&app, Method::POST, "/films", Some(json!({"title": "Avatar"}))).await;
        send(&app, Method::POST, "/distributors", Some(json!({"name": "Fox"}))).await;
        send(&app, Method::POST, "/distributors", Some(json!({"name": "MGM"}))).await;
        send(
            &app,
            Method::PUT,
            "/distributors/1",
            Some(json!({"country": "USA"})),
        )
        .await;
        send(&app, Method::DELETE, "/distributors/2", None).await;

        film["_id"].as_str().unwrap().to_string()
    };

    let store = Arc::new(MemoryStore::open(tmp.path(), catalog_schemas()).unwrap());
    let app = app_with_store(store);

    let (status, film) = send(&app, Method::GET, &format!("/films/{}", film_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(film["title"], "Avatar");

    let (_, distributors) = send(&app, Method::GET, "/distributors", None).await;
    assert_eq!(
        distributors,
        json!([{"_id": 1, "name": "Fox", "country": "USA"}])
    );
}

/// Id generation continues from the persisted maximum.
#[tokio::test]
async fn test_ids_continue_after_reopen() {
    let tmp = TempDir::new().unwrap();

    {
        let store = Arc::new(MemoryStore::open(tmp.path(), catalog_schemas()).unwrap());
        let app = app_with_store(store);
        send(&app, Method::POST, "/distributors", Some(json!({"name": "Fox"}))).await;
    }

    let store = Arc::new(MemoryStore::open(tmp.path(), catalog_schemas()).unwrap());
    let app = app_with_store(store);
    let (_, created) = send(&app, Method::POST, "/distributors", Some(json!({"name": "MGM"}))).await;
    assert_eq!(created["_id"], 2);
}

// =============================================================================
// Failure Handling
// =============================================================================

/// A collection file with schema-violating documents refuses to open.
#[test]
fn test_open_rejects_invalid_documents() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("distributors.json"),
        r#"[{"_id": 1, "country": "USA"}]"#,
    )
    .unwrap();

    assert!(MemoryStore::open(tmp.path(), catalog_schemas()).is_err());
}

/// When the collection file cannot be written, every mutation is a 500
/// and the served catalog stays as it was.
#[tokio::test]
async fn test_write_failure_is_server_error() {
    let tmp = TempDir::new().unwrap();
    let store = Arc::new(MemoryStore::open(tmp.path(), catalog_schemas()).unwrap());
    let app = app_with_store(store);
    send(&app, Method::POST, "/distributors", Some(json!({"name": "Fox"}))).await;

    // a directory where the temp file goes makes every save fail
    std::fs::create_dir(tmp.path().join("distributors.json.tmp")).unwrap();

    let (status, body) = send(&app, Method::POST, "/distributors", Some(json!({"name": "MGM"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!message(&body).is_empty());

    let (status, body) = send(
        &app,
        Method::PUT,
        "/distributors/1",
        Some(json!({"country": "USA"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!message(&body).is_empty());

    let (status, bytes) = send_raw(&app, Method::DELETE, "/distributors/1", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert!(!message(&body).is_empty());

    let (status, list) = send(&app, Method::GET, "/distributors", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([{"_id": 1, "name": "Fox"}]));

    // films are stored in their own file and still writable
    let (status, _) = send(&app, Method::POST, "/films", Some(json!({"title": "Avatar"}))).await;
    assert_eq!(status, StatusCode::CREATED);
}
