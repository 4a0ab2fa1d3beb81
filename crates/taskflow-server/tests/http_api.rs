//! HTTP API integration tests.
//!
//! These drive the router directly, without binding a socket.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use taskflow_core::TaskType;
use taskflow_engine::{InMemoryTaskStore, TaskEngine};
use taskflow_server::{create_router, AppState};

fn test_engine() -> TaskEngine {
    TaskEngine::with_builtins(Arc::new(InMemoryTaskStore::new()))
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    };
    (status, json)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn create(router: &Router, body: Value) -> Value {
    let (status, task) = send(router, post_json("/tasks", body)).await;
    assert_eq!(status, StatusCode::CREATED);
    task
}

/// Test: Health endpoint responds with status ok.
#[tokio::test]
async fn test_health_endpoint() {
    let router = create_router(AppState::new(test_engine()));
    let (status, json) = send(&router, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

/// Test: Creating a task returns 201 with defaults merged into metadata.
#[tokio::test]
async fn test_create_and_get_task() {
    let router = create_router(AppState::new(test_engine()));
    let task = create(
        &router,
        json!({
            "name": "ping",
            "type": "http_request",
            "config": { "url": "https://example.com" },
            "metadata": { "priority": 9 }
        }),
    )
    .await;

    assert_eq!(task["name"], "ping");
    assert_eq!(task["type"], "http_request");
    assert_eq!(task["metadata"]["priority"], 9);
    assert_eq!(task["metadata"]["timeout_ms"], 30000);

    let id = task["id"].as_str().unwrap();
    let (status, fetched) = send(&router, get(&format!("/tasks/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, task);
}

/// Test: Missing name, missing type and unknown type are rejected.
#[tokio::test]
async fn test_create_task_validation() {
    let router = create_router(AppState::new(test_engine()));

    let (status, json) = send(&router, post_json("/tasks", json!({ "type": "email_send" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "name is required");

    let (status, json) = send(&router, post_json("/tasks", json!({ "name": "x" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "type is required");

    let (status, json) = send(
        &router,
        post_json("/tasks", json!({ "name": "x", "type": "teleport" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("teleport"));
}

/// Test: Malformed create bodies are 400 with an error object.
#[tokio::test]
async fn test_create_task_rejects_malformed_body() {
    let router = create_router(AppState::new(test_engine()));

    let (status, json) = send(
        &router,
        post_json("/tasks", json!({ "name": "x", "type": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());

    let request = Request::builder()
        .method("POST")
        .uri("/tasks")
        .body(Body::from(r#"{"name":"x"}"#))
        .unwrap();
    let (status, json) = send(&router, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());

    let request = Request::builder()
        .method("POST")
        .uri("/tasks")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, json) = send(&router, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
}

/// Test: Unknown task and execution ids return 404.
#[tokio::test]
async fn test_not_found_routes() {
    let router = create_router(AppState::new(test_engine()));

    let (status, _) = send(&router, get("/tasks/missing")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&router, get("/executions/missing")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, json) = send(&router, post_json("/tasks/missing/execute", json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("missing"));
}

/// Test: A failed execution still responds 200 and is listed in history.
#[tokio::test]
async fn test_failed_execution_returns_ok() {
    let router = create_router(AppState::new(test_engine()));
    let task = create(
        &router,
        json!({ "name": "no query", "type": "database_query", "config": {} }),
    )
    .await;
    let id = task["id"].as_str().unwrap();

    let (status, exec) = send(
        &router,
        post_json(&format!("/tasks/{id}/execute"), json!({ "input": { "n": 1 } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(exec["status"], "failed");
    assert_eq!(exec["task_id"], id);
    assert_eq!(exec["input"], json!({ "n": 1 }));
    assert!(exec["error"].is_string());
    assert!(exec.get("output").is_none());

    let exec_id = exec["id"].as_str().unwrap();
    let (status, fetched) = send(&router, get(&format!("/executions/{exec_id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, exec);

    let (status, history) = send(&router, get(&format!("/tasks/{id}/executions"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history.as_array().unwrap().len(), 1);
}

/// Test: Execute accepts an empty body.
#[tokio::test]
async fn test_execute_without_body() {
    let router = create_router(AppState::new(test_engine()));
    let task = create(
        &router,
        json!({ "name": "script", "type": "custom_script", "config": { "script": "echo hi" } }),
    )
    .await;
    let id = task["id"].as_str().unwrap();

    let request = Request::builder()
        .method("POST")
        .uri(format!("/tasks/{id}/execute"))
        .body(Body::empty())
        .unwrap();
    let (status, exec) = send(&router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(exec["status"], "completed");
    assert_eq!(exec["output"]["script"], "echo hi");
    assert!(exec["metrics"]["duration_ms"].as_u64().is_some());
}

/// Test: Empty history is an empty list, not a 404.
#[tokio::test]
async fn test_empty_history() {
    let router = create_router(AppState::new(test_engine()));
    let (status, history) = send(&router, get("/tasks/anything/executions")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(history, json!([]));
}

/// Test: Task types reflect runtime registrations.
#[tokio::test]
async fn test_task_types_endpoint() {
    let engine = test_engine();
    engine
        .register_executor_fn(TaskType::from("noop"), |_, _| async { Ok(json!({ "ok": true })) })
        .await;
    let router = create_router(AppState::new(engine));

    let (status, types) = send(&router, get("/task-types")).await;
    assert_eq!(status, StatusCode::OK);

    let types: Vec<&str> = types
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|t| t.as_str())
        .collect();
    assert!(types.contains(&"http_request"));
    assert!(types.contains(&"notify_b"));
    assert!(types.contains(&"noop"));
}

/// Test: Task list returns created tasks.
#[tokio::test]
async fn test_list_tasks() {
    let router = create_router(AppState::new(test_engine()));
    create(&router, json!({ "name": "a", "type": "notify_a" })).await;
    create(&router, json!({ "name": "b", "type": "notify_b" })).await;

    let (status, tasks) = send(&router, get("/tasks")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tasks.as_array().unwrap().len(), 2);
}

/// Test: Metrics endpoint serves Prometheus text.
#[tokio::test]
async fn test_metrics_endpoint() {
    let router = create_router(AppState::new(test_engine()));
    let response = router.oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("taskflow_tasks_total 0"));
}
