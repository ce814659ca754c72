// SPDX-License-Identifier: MIT

//! Integration tests for webhook handling.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use challenge_tracker::services::calculator::process_activities;
use chrono::Utc;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_webhook_verification() {
    let (app, _state) = common::create_test_app();

    let challenge = "test_challenge_123";
    let verify_token = "test_verify_token"; // Matches Config::test_default()

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!(
                    "/webhook?hub.mode=subscribe&hub.challenge={}&hub.verify_token={}",
                    challenge, verify_token
                ))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    // Verify the response echoes the challenge
    let body = axum::body::to_bytes(response.into_body(), 1024)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["hub.challenge"], challenge);
}

#[tokio::test]
async fn test_webhook_verification_wrong_token() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/webhook?hub.mode=subscribe&hub.challenge=c&hub.verify_token=wrong_token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_webhook_verification_wrong_mode() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/webhook?hub.mode=unsubscribe&hub.challenge=c&hub.verify_token=test_verify_token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_activity_event_invalidates_cache() {
    let (app, state) = common::create_test_app();

    // Seed the cache so there is something to invalidate.
    let data = process_activities(&[], 2026.0, 2026, Utc::now());
    state.cache.write(&data).await;
    assert!(state.cache.read().await.is_some());

    let event = json!({
        "aspect_type": "create",
        "event_time": 1234567890,
        "object_id": 12345678901_u64,
        "object_type": "activity",
        "owner_id": 123456,
        "subscription_id": 12345
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/webhook")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&event).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(state.cache.read().await.is_none());
}

#[tokio::test]
async fn test_athlete_event_leaves_cache_alone() {
    let (app, state) = common::create_test_app();

    let data = process_activities(&[], 2026.0, 2026, Utc::now());
    state.cache.write(&data).await;

    let event = json!({
        "aspect_type": "update",
        "object_id": 123456,
        "object_type": "athlete",
        "owner_id": 123456,
        "subscription_id": 12345,
        "updates": {"authorized": "false"}
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/webhook")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&event).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(state.cache.read().await.is_some());
}

#[tokio::test]
async fn test_invalid_event_payload_rejected() {
    let (app, _state) = common::create_test_app();

    // Missing object_id
    let event = json!({
        "aspect_type": "create",
        "object_type": "activity"
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/webhook")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&event).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = axum::body::to_bytes(response.into_body(), 1024)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "bad_request");
    assert_eq!(json["details"], "Invalid payload");
}

#[tokio::test]
async fn test_unknown_object_type_rejected() {
    let (app, _state) = common::create_test_app();

    let event = json!({
        "aspect_type": "create",
        "object_id": 1,
        "object_type": "gear"
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/webhook")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&event).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = axum::body::to_bytes(response.into_body(), 1024)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "bad_request");
    assert_eq!(json["details"], "Invalid object_type");
}
