// SPDX-License-Identifier: MIT

//! Challenge data pipeline.
//!
//! One invocation runs sequentially: cache read, rate-limit admission,
//! token refresh, paginated fetch, filter, compute, cache write. A cache
//! hit returns without touching the upstream API at all.

use chrono::Utc;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::ChallengeData;
use crate::services::calculator::process_activities;
use crate::services::{ChallengeCache, RateLimiter, StravaClient};
use crate::time_utils::start_of_year;

/// High-level service producing the challenge snapshot.
#[derive(Clone)]
pub struct ChallengeService {
    client: StravaClient,
    cache: ChallengeCache,
    rate_limiter: RateLimiter,
    refresh_token: String,
    goal_km: f64,
    challenge_year: i32,
}

impl ChallengeService {
    pub fn new(
        client: StravaClient,
        cache: ChallengeCache,
        rate_limiter: RateLimiter,
        config: &Config,
    ) -> Self {
        Self {
            client,
            cache,
            rate_limiter,
            refresh_token: config.strava_refresh_token.clone(),
            goal_km: config.challenge_goal_km,
            challenge_year: config.challenge_year,
        }
    }

    /// Return the current snapshot, recomputing from Strava on a cache miss.
    pub async fn get_challenge_data(&self) -> Result<ChallengeData> {
        if let Some(cached) = self.cache.read().await {
            return Ok(cached);
        }

        let admission = self.rate_limiter.check_and_increment().await;
        if !admission.allowed {
            return Err(AppError::RateLimited);
        }
        tracing::debug!(remaining = admission.remaining, "Upstream call admitted");

        let tokens = self.client.refresh_token(&self.refresh_token).await?;

        let after = start_of_year(self.challenge_year).timestamp();
        let activities = self
            .client
            .fetch_activities_since(&tokens.access_token, after)
            .await?;

        let challenge_activities = StravaClient::filter_challenge_activities(activities);
        tracing::info!(
            count = challenge_activities.len(),
            year = self.challenge_year,
            "Fetched challenge activities"
        );

        let data = process_activities(
            &challenge_activities,
            self.goal_km,
            self.challenge_year,
            Utc::now(),
        );

        self.cache.write(&data).await;
        Ok(data)
    }
}
