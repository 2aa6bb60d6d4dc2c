// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{header, Request, Response},
};
use exercise_tracker::config::Config;
use exercise_tracker::db::{FirestoreDb, MemoryDb};
use exercise_tracker::routes::create_router;
use exercise_tracker::services::ExerciseService;
use exercise_tracker::AppState;
use std::sync::Arc;
use tower::ServiceExt;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a test app over a fresh in-memory store.
/// Returns the router and the store so tests can inspect it.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<MemoryDb>) {
    let db = Arc::new(MemoryDb::new());
    let state = Arc::new(AppState {
        config: Config::default(),
        exercises: ExerciseService::new(db.clone()),
    });
    (create_router(state), db)
}

#[allow(dead_code)]
pub async fn post_form(app: &axum::Router, uri: &str, body: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

#[allow(dead_code)]
pub async fn post_json(app: &axum::Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

#[allow(dead_code)]
pub async fn get(app: &axum::Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Register a user through the API and return its ID.
#[allow(dead_code)]
pub async fn register(app: &axum::Router, username: &str) -> String {
    let response = post_form(
        app,
        "/api/exercise/new-user",
        &format!("username={}", username),
    )
    .await;
    assert_eq!(response.status(), 200);
    body_json(response).await["_id"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Add an exercise through the API.
#[allow(dead_code)]
pub async fn add(app: &axum::Router, user_id: &str, description: &str, date: &str) {
    let body = format!(
        "userId={}&description={}&duration=30&date={}",
        user_id, description, date
    );
    let response = post_form(app, "/api/exercise/add", &body).await;
    assert_eq!(response.status(), 200);
}
