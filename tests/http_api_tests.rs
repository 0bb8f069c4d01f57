//! HTTP API tests
//!
//! Drives the router with `tower::ServiceExt::oneshot` and checks status codes
//! and JSON bodies for the edit protocol.

use std::fs;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use edit_history::api::http::create_router;
use edit_history::api::state::AppState;
use edit_history::EditEngine;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::util::ServiceExt;

fn setup(files: &[(&str, &str)]) -> (TempDir, Router) {
    let temp_dir = TempDir::new().unwrap();
    for (name, content) in files {
        fs::write(temp_dir.path().join(name), content).unwrap();
    }
    let state = Arc::new(AppState::new(EditEngine::new(temp_dir.path())));
    (temp_dir, create_router(state))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

#[tokio::test]
async fn test_apply_undo_redo_over_http() {
    let (dir, app) = setup(&[("doc.txt", "line1\nline2\nline3\n")]);
    let path = dir.path().join("doc.txt");

    let (status, body) = post(
        &app,
        "/api/apply",
        json!({"filePath": "doc.txt", "startLine": 2, "endLine": 2, "modified": "MODIFIED"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(fs::read_to_string(&path).unwrap(), "line1\nMODIFIED\nline3\n");

    let (status, body) = post(&app, "/api/undo", json!({"filePath": "doc.txt"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["scrollHint"], "line2");
    assert_eq!(fs::read_to_string(&path).unwrap(), "line1\nline2\nline3\n");

    let (status, body) = post(&app, "/api/redo", json!({"filePath": "doc.txt"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["scrollHint"], "MODIFIED");
    assert_eq!(fs::read_to_string(&path).unwrap(), "line1\nMODIFIED\nline3\n");
}

#[tokio::test]
async fn test_history_state_endpoint() {
    let (_dir, app) = setup(&[("s.txt", "x\n")]);

    let (status, body) = get(&app, "/api/history-state?filePath=s.txt").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"canUndo": false, "canRedo": false}));

    post(
        &app,
        "/api/apply",
        json!({"filePath": "s.txt", "startLine": 1, "endLine": 1, "modified": "y"}),
    )
    .await;
    let (_, body) = get(&app, "/api/history-state?filePath=s.txt").await;
    assert_eq!(body, json!({"canUndo": true, "canRedo": false}));

    post(&app, "/api/undo", json!({"filePath": "s.txt"})).await;
    let (_, body) = get(&app, "/api/history-state?filePath=s.txt").await;
    assert_eq!(body, json!({"canUndo": false, "canRedo": true}));
}

#[tokio::test]
async fn test_nothing_to_undo_or_redo() {
    let (_dir, app) = setup(&[("e.txt", "x\n")]);

    let (status, body) = post(&app, "/api/undo", json!({"filePath": "e.txt"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Nothing to undo");

    let (status, body) = post(&app, "/api/redo", json!({"filePath": "e.txt"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Nothing to redo");
}

#[tokio::test]
async fn test_missing_file_path_is_bad_request() {
    let (_dir, app) = setup(&[]);

    for uri in ["/api/undo", "/api/redo"] {
        let (status, body) = post(&app, uri, json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["code"], "BAD_REQUEST");
    }

    let (status, _) = post(&app, "/api/apply", json!({"startLine": 1, "endLine": 1, "modified": "x"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(&app, "/api/history-state").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let (_dir, app) = setup(&[("a.txt", "a\n")]);

    let request = Request::builder()
        .method("POST")
        .uri("/api/undo")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = post(
        &app,
        "/api/apply",
        json!({"filePath": "a.txt", "startLine": -1, "endLine": 1, "modified": "x"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_apply_invalid_range_and_missing_file() {
    let (_dir, app) = setup(&[("a.txt", "a\nb\n")]);

    let (status, _) = post(
        &app,
        "/api/apply",
        json!({"filePath": "a.txt", "startLine": 2, "endLine": 1, "modified": "x"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = post(
        &app,
        "/api/apply",
        json!({"filePath": "gone.txt", "startLine": 1, "endLine": 1, "modified": "x"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_conflict_is_409_and_leaves_file_alone() {
    let (dir, app) = setup(&[("c.txt", "one\ntwo\n")]);
    let path = dir.path().join("c.txt");

    post(
        &app,
        "/api/apply",
        json!({"filePath": "c.txt", "startLine": 1, "endLine": 1, "modified": "ONE"}),
    )
    .await;
    fs::write(&path, "ONE\ntwo\nthree\n").unwrap();

    let (status, body) = post(&app, "/api/undo", json!({"filePath": "c.txt"})).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
    assert!(body["expectedHash"].is_string());
    assert!(body["actualHash"].is_string());
    assert_eq!(fs::read_to_string(&path).unwrap(), "ONE\ntwo\nthree\n");
}

#[tokio::test]
async fn test_redo_after_new_apply_conflicts() {
    let (_dir, app) = setup(&[("n.txt", "a\nb\nc\n")]);

    post(
        &app,
        "/api/apply",
        json!({"filePath": "n.txt", "startLine": 1, "endLine": 1, "modified": "A"}),
    )
    .await;
    post(&app, "/api/undo", json!({"filePath": "n.txt"})).await;
    post(
        &app,
        "/api/apply",
        json!({"filePath": "n.txt", "startLine": 2, "endLine": 2, "modified": "B"}),
    )
    .await;

    let (status, _) = post(&app, "/api/redo", json!({"filePath": "n.txt"})).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_history_endpoint_lists_events() {
    let (_dir, app) = setup(&[("h.txt", "a\nb\n")]);

    post(
        &app,
        "/api/apply",
        json!({"filePath": "h.txt", "startLine": 1, "endLine": 2, "modified": "only"}),
    )
    .await;
    post(&app, "/api/undo", json!({"filePath": "h.txt"})).await;

    let (status, body) = get(&app, "/api/history?filePath=h.txt").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["filePath"], "h.txt");
    assert_eq!(body["canRedo"], true);

    let events = body["events"].as_array().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["originalLineCount"], 2);
    assert_eq!(events[0]["modifiedLineCount"], 1);
    assert!(events[0].get("meta").is_none());
    assert_eq!(events[1]["meta"], json!({"isUndo": true, "undoTarget": events[0]["seq"]}));
}
