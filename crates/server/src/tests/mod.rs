// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use charity_tasks_persistence::Persistence;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceExt;

use crate::identity::USER_ID_HEADER;
use crate::{AppState, build_router};

/// Helper to create a router over a fresh in-memory database.
pub fn create_test_app() -> Router {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    build_router(AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    })
}

/// Sends one request and returns the status and parsed JSON body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    user_id: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user_id) = user_id {
        builder = builder.header(USER_ID_HEADER, user_id);
    }
    let request: Request<Body> = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status: StatusCode = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

pub async fn register_charity(app: &Router, user_id: &str) {
    let (status, _) = send(
        app,
        "POST",
        "/charities",
        Some(user_id),
        Some(json!({"name": format!("{user_id} trust"), "reg_number": "C-1"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

/// Registers a benefactor and returns its profile id.
pub async fn register_benefactor(app: &Router, user_id: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/benefactors",
        Some(user_id),
        Some(json!({"experience": 1, "free_time_per_week": 10})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

/// Creates a task as `user_id` and returns its id.
pub async fn create_task(app: &Router, user_id: &str, title: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/tasks",
        Some(user_id),
        Some(json!({"title": title})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

pub fn assert_error(status: StatusCode, body: &Value, expected: StatusCode, category: &str) {
    assert_eq!(status, expected, "unexpected status, body: {body}");
    assert_eq!(body["error"], category);
}
