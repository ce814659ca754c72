// SPDX-License-Identifier: MIT

//! Strava API client for the challenge pipeline.
//!
//! Handles:
//! - OAuth token refresh (one refresh per pipeline run, nothing persisted)
//! - Paginated activity fetching with per-record validation
//! - Filtering down to the challenge activity types

use crate::config::FetchLimits;
use crate::error::AppError;
use crate::models::RawActivity;
use serde::Deserialize;

const STRAVA_API_BASE: &str = "https://www.strava.com/api/v3";
const STRAVA_TOKEN_URL: &str = "https://www.strava.com/oauth/token";

/// Activity types that count toward the challenge.
pub const CHALLENGE_ACTIVITY_TYPES: [&str; 2] = ["Run", "Walk"];

/// Strava API client.
#[derive(Clone)]
pub struct StravaClient {
    http: reqwest::Client,
    base_url: String,
    token_url: String,
    client_id: String,
    client_secret: String,
    limits: FetchLimits,
}

impl StravaClient {
    /// Create a new Strava client with OAuth credentials.
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self::with_base_urls(
            client_id,
            client_secret,
            STRAVA_API_BASE.to_string(),
            STRAVA_TOKEN_URL.to_string(),
        )
    }

    /// Create a client against alternate endpoints (used by tests).
    pub fn with_base_urls(
        client_id: String,
        client_secret: String,
        base_url: String,
        token_url: String,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            token_url,
            client_id,
            client_secret,
            limits: FetchLimits::default(),
        }
    }

    /// Override pagination limits (used by tests).
    pub fn with_limits(mut self, limits: FetchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Exchange the long-lived refresh token for a fresh access token.
    ///
    /// Upstream error bodies are logged but never surfaced in the returned
    /// error message.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<TokenResponse, AppError> {
        let body = serde_json::json!({
            "client_id": self.client_id,
            "client_secret": self.client_secret,
            "refresh_token": refresh_token,
            "grant_type": "refresh_token",
        });

        let response = self
            .http
            .post(&self.token_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::TokenRefresh(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Strava token refresh failed");
            return Err(AppError::TokenRefresh(format!(
                "upstream returned status {}",
                status
            )));
        }

        response
            .json::<TokenResponse>()
            .await
            .map_err(|_| AppError::TokenRefresh("invalid token response from Strava".to_string()))
    }

    /// Retrieve every activity recorded at or after `after` (Unix seconds).
    ///
    /// Pages are requested sequentially until a short page arrives or the
    /// page ceiling is hit; the ceiling is a safety valve, not an error.
    /// Individual invalid records are dropped; a non-empty page that
    /// validates down to nothing aborts the whole fetch, since that points
    /// at an upstream schema change rather than data noise.
    pub async fn fetch_activities_since(
        &self,
        access_token: &str,
        after: i64,
    ) -> Result<Vec<RawActivity>, AppError> {
        let mut all = Vec::new();

        for page in 1..=self.limits.max_pages {
            let raw_page = self.list_activities_page(access_token, after, page).await?;
            let raw_len = raw_page.len();

            let valid = validate_page(raw_page);
            if raw_len > 0 && valid.is_empty() {
                tracing::error!(page, raw_len, "Every activity in page failed validation");
                return Err(AppError::AllActivitiesInvalid);
            }
            all.extend(valid);

            // A short page means we have everything.
            if raw_len < self.limits.per_page {
                return Ok(all);
            }

            if page == self.limits.max_pages {
                tracing::warn!(
                    pages = page,
                    collected = all.len(),
                    "Page ceiling reached, returning partial activity history"
                );
            }
        }

        Ok(all)
    }

    /// Keep only the activity types that count toward the challenge.
    /// Order-preserving; empty input yields empty output.
    pub fn filter_challenge_activities(activities: Vec<RawActivity>) -> Vec<RawActivity> {
        activities
            .into_iter()
            .filter(|a| {
                CHALLENGE_ACTIVITY_TYPES
                    .iter()
                    .any(|t| *t == a.activity_type)
            })
            .collect()
    }

    /// Fetch one page of raw activity records.
    async fn list_activities_page(
        &self,
        access_token: &str,
        after: i64,
        page: usize,
    ) -> Result<Vec<serde_json::Value>, AppError> {
        let url = format!("{}/athlete/activities", self.base_url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .query(&[
                ("after", after.to_string()),
                ("page", page.to_string()),
                ("per_page", self.limits.per_page.to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::StravaApi(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, page, "Strava activities request failed");
            return Err(AppError::StravaApi(format!(
                "activities request returned status {}",
                status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::StravaApi(format!("JSON parse error: {}", e)))
    }
}

/// Deserialize and validate one page of records, dropping invalid entries.
fn validate_page(raw_page: Vec<serde_json::Value>) -> Vec<RawActivity> {
    raw_page
        .into_iter()
        .filter_map(|value| {
            let id = value.get("id").and_then(serde_json::Value::as_u64);
            match serde_json::from_value::<RawActivity>(value) {
                Ok(activity) if activity.is_valid() => Some(activity),
                Ok(activity) => {
                    tracing::warn!(id = activity.id, "Dropping activity with invalid distance");
                    None
                }
                Err(e) => {
                    tracing::warn!(id, error = %e, "Dropping activity with missing fields");
                    None
                }
            }
        })
        .collect()
}

/// Token refresh response from Strava.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_at: i64,
}
