// SPDX-License-Identifier: MIT

//! Challenge-Tracker API Server
//!
//! Serves the annual distance challenge snapshot, backed by Strava with a
//! TTL'd cache and a sliding-window rate limiter in front of the upstream
//! API.

use challenge_tracker::{
    config::{CacheConfig, Config, RateLimitConfig},
    services::{ChallengeCache, ChallengeService, RateLimiter, StravaClient},
    store::{KvStore, RedisStore},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(
        port = config.port,
        year = config.challenge_year,
        goal_km = config.challenge_goal_km,
        "Starting Challenge-Tracker API"
    );

    // Connect the key-value store. Without one the service still works,
    // recomputing on every request and skipping quota tracking.
    let store: Option<Arc<dyn KvStore>> = match &config.redis_url {
        Some(url) => {
            let redis = RedisStore::new(url).expect("Failed to create Redis client");
            redis.ping().await.expect("Failed to connect to Redis");
            tracing::info!("Connected to Redis");
            Some(Arc::new(redis))
        }
        None => {
            tracing::warn!("REDIS_URL not set, running without cache or rate limiting");
            None
        }
    };

    let cache = ChallengeCache::new(store.clone(), CacheConfig::default());
    let rate_limiter = RateLimiter::new(store, RateLimitConfig::default());
    let client = StravaClient::new(
        config.strava_client_id.clone(),
        config.strava_client_secret.clone(),
    );
    let challenge = ChallengeService::new(client, cache.clone(), rate_limiter, &config);

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        cache,
        challenge,
    });

    // Build router
    let app = challenge_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("challenge_tracker=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
