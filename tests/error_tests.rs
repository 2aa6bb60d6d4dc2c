// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use exercise_tracker::error::AppError;

mod common;
use common::{body_json, get, post_form};

#[tokio::test]
async fn test_error_status_mapping() {
    let cases = [
        (AppError::Validation("bad".to_string()), StatusCode::BAD_REQUEST, "validation_error"),
        (AppError::NotFound("gone".to_string()), StatusCode::BAD_REQUEST, "not_found"),
        (AppError::Database("down".to_string()), StatusCode::BAD_GATEWAY, "database_error"),
        (
            AppError::Internal(anyhow::anyhow!("boom")),
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
        ),
    ];

    for (err, status, code) in cases {
        let response = err.into_response();
        assert_eq!(response.status(), status);
        assert_eq!(body_json(response).await["error"], code);
    }
}

#[tokio::test]
async fn test_database_details_not_leaked() {
    let response = AppError::Database("connection refused at 10.0.0.1".to_string()).into_response();
    let body = body_json(response).await;
    assert!(!body["msg"].as_str().unwrap().contains("10.0.0.1"));
}

#[tokio::test]
async fn test_store_outage_answers_every_route() {
    let (app, db) = common::create_test_app();
    db.set_offline(true);

    let responses = [
        post_form(&app, "/api/exercise/new-user", "username=alice").await,
        get(&app, "/api/exercise/users").await,
        post_form(&app, "/api/exercise/add", "userId=u&description=x&duration=1").await,
        get(&app, "/api/exercise/log?userId=u").await,
    ];

    for response in responses {
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(body_json(response).await["error"], "database_error");
    }
}
