// SPDX-License-Identifier: MIT

//! Webhook routes for Strava events.
//!
//! The webhook drives exactly two core operations: the verification
//! handshake (GET) and cache invalidation on activity events (POST).

use crate::error::{AppError, Result};
use crate::AppState;
use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// Webhook routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/webhook", get(verify).post(handle_event))
}

/// Strava webhook verification query params.
#[derive(Deserialize)]
struct VerifyParams {
    #[serde(rename = "hub.mode")]
    mode: String,
    #[serde(rename = "hub.challenge")]
    challenge: String,
    #[serde(rename = "hub.verify_token")]
    verify_token: String,
}

/// Verification response.
#[derive(Serialize, Default)]
struct VerifyResponse {
    #[serde(rename = "hub.challenge")]
    challenge: String,
}

/// Compare the provided verification token in constant time.
fn verify_token_matches(provided: &str, expected: &str) -> bool {
    provided.as_bytes().ct_eq(expected.as_bytes()).into()
}

/// Verify webhook subscription (GET).
async fn verify(
    State(state): State<Arc<AppState>>,
    Query(params): Query<VerifyParams>,
) -> impl IntoResponse {
    if params.mode == "subscribe"
        && verify_token_matches(&params.verify_token, &state.config.webhook_verify_token)
    {
        tracing::info!("Webhook subscription verified");
        (
            StatusCode::OK,
            Json(VerifyResponse {
                challenge: params.challenge,
            }),
        )
    } else {
        tracing::warn!(
            mode = %params.mode,
            "Webhook verification failed: invalid token"
        );
        (StatusCode::FORBIDDEN, Json(VerifyResponse::default()))
    }
}

/// Strava webhook event payload.
#[derive(Deserialize, Debug)]
struct WebhookEvent {
    object_type: String, // "activity" or "athlete"
    object_id: u64,
    aspect_type: String, // "create", "update", "delete"
}

const VALID_OBJECT_TYPES: [&str; 2] = ["activity", "athlete"];
const VALID_ASPECT_TYPES: [&str; 3] = ["create", "update", "delete"];

/// Handle incoming webhook events (POST).
///
/// Any activity event invalidates the cached snapshot so the next page
/// load recomputes. Athlete events are acknowledged and ignored.
async fn handle_event(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<serde_json::Value>,
) -> Result<(StatusCode, &'static str)> {
    let event: WebhookEvent = serde_json::from_value(payload).map_err(|e| {
        tracing::error!(error = %e, "Invalid webhook payload");
        AppError::BadRequest("Invalid payload".to_string())
    })?;

    if !VALID_OBJECT_TYPES.contains(&event.object_type.as_str()) {
        tracing::error!(object_type = %event.object_type, "Invalid object_type");
        return Err(AppError::BadRequest("Invalid object_type".to_string()));
    }

    if !VALID_ASPECT_TYPES.contains(&event.aspect_type.as_str()) {
        tracing::error!(aspect_type = %event.aspect_type, "Invalid aspect_type");
        return Err(AppError::BadRequest("Invalid aspect_type".to_string()));
    }

    tracing::info!(
        object_type = %event.object_type,
        object_id = event.object_id,
        aspect_type = %event.aspect_type,
        "Webhook event received"
    );

    if event.object_type == "activity" {
        state.cache.invalidate().await;
        tracing::info!(
            activity_id = event.object_id,
            "Cache invalidated due to activity event"
        );
    }

    Ok((StatusCode::OK, "EVENT_RECEIVED"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_token_matches() {
        assert!(verify_token_matches("secret", "secret"));
        assert!(!verify_token_matches("secret", "other"));
        assert!(!verify_token_matches("sec", "secret"));
        assert!(!verify_token_matches("", "secret"));
    }
}
