// SPDX-License-Identifier: MIT

//! Application configuration loaded from environment variables.
//!
//! Credentials are read once at startup; the pipeline itself never touches
//! the environment, so tests can run against `Config::test_default()`.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Strava OAuth client ID
    pub strava_client_id: String,
    /// Strava OAuth client secret
    pub strava_client_secret: String,
    /// Long-lived Strava refresh token for the challenge athlete
    pub strava_refresh_token: String,
    /// Webhook verification token
    pub webhook_verify_token: String,
    /// Challenge goal distance in kilometers
    pub challenge_goal_km: f64,
    /// Challenge year
    pub challenge_year: i32,
    /// Redis URL for the cache / rate-limit store (optional)
    pub redis_url: Option<String>,
    /// Server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// The three Strava credentials and the webhook verification token are
    /// required and must be non-empty; everything else has a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            strava_client_id: require_env("STRAVA_CLIENT_ID")?,
            strava_client_secret: require_env("STRAVA_CLIENT_SECRET")?,
            strava_refresh_token: require_env("STRAVA_REFRESH_TOKEN")?,
            webhook_verify_token: require_env("STRAVA_WEBHOOK_VERIFY_TOKEN")?,
            challenge_goal_km: env::var("CHALLENGE_GOAL_KM")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_GOAL_KM),
            challenge_year: env::var("CHALLENGE_YEAR")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CHALLENGE_YEAR),
            redis_url: env::var("REDIS_URL").ok().filter(|v| !v.trim().is_empty()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            strava_client_id: "test_client_id".to_string(),
            strava_client_secret: "test_secret".to_string(),
            strava_refresh_token: "test_refresh_token".to_string(),
            webhook_verify_token: "test_verify_token".to_string(),
            challenge_goal_km: DEFAULT_GOAL_KM,
            challenge_year: DEFAULT_CHALLENGE_YEAR,
            redis_url: None,
            port: 8080,
        }
    }
}

/// Default challenge goal: 2026 km in 2026.
pub const DEFAULT_GOAL_KM: f64 = 2026.0;
pub const DEFAULT_CHALLENGE_YEAR: i32 = 2026;

/// Read a required environment variable, rejecting empty values.
fn require_env(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

// ─── Component limits ────────────────────────────────────────
//
// Limits are explicit structs passed into each component rather than
// module-level globals, so tests can shrink them without touching
// process state.

/// Pagination limits for the activity fetcher.
#[derive(Debug, Clone, Copy)]
pub struct FetchLimits {
    /// Activities requested per page
    pub per_page: usize,
    /// Hard ceiling on sequential page requests
    pub max_pages: usize,
}

impl Default for FetchLimits {
    fn default() -> Self {
        Self {
            per_page: 200,
            max_pages: 50,
        }
    }
}

/// Cache slot configuration.
#[derive(Debug, Clone, Copy)]
pub struct CacheConfig {
    /// Logical (and store-level) TTL in seconds
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_secs: 86_400 } // 24 hours
    }
}

/// Sliding-window rate limit configuration, mirroring Strava's two-tier
/// quota (200/15min and 2000/day; we stay under the short cap).
#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    /// Short window duration in seconds
    pub window_secs: u64,
    /// Max admitted requests per short window
    pub window_cap: usize,
    /// Long window duration in seconds
    pub daily_secs: u64,
    /// Max admitted requests per long window
    pub daily_cap: usize,
    /// Storage-size safeguard for the short-window timestamp list
    pub max_stored_timestamps: usize,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_secs: 900,
            window_cap: 180,
            daily_secs: 86_400,
            daily_cap: 2000,
            max_stored_timestamps: 300,
        }
    }
}
