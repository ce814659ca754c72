// SPDX-License-Identifier: MIT

//! Public API routes.

use crate::error::Result;
use crate::models::ChallengeData;
use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;

/// Public routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/challenge", get(get_challenge))
}

/// Get the current challenge snapshot.
///
/// Served from cache when possible; a full pipeline failure surfaces a
/// typed error body that the consuming page renders as its generic
/// "data unavailable" state.
async fn get_challenge(State(state): State<Arc<AppState>>) -> Result<Json<ChallengeData>> {
    let data = state.challenge.get_challenge_data().await?;
    Ok(Json(data))
}
