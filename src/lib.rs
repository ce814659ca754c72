// SPDX-License-Identifier: MIT

//! Challenge-Tracker: annual distance challenge backend.
//!
//! This crate provides the data-ingestion and caching pipeline behind the
//! running challenge widget: Strava token refresh, paginated activity
//! fetching, progress statistics, a TTL'd snapshot cache and a sliding
//! window rate limiter guarding the upstream API quota.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod time_utils;

use config::Config;
use services::{ChallengeCache, ChallengeService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub cache: ChallengeCache,
    pub challenge: ChallengeService,
}
