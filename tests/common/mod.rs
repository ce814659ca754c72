// SPDX-License-Identifier: MIT

use challenge_tracker::config::{CacheConfig, Config, RateLimitConfig};
use challenge_tracker::routes::create_router;
use challenge_tracker::services::{ChallengeCache, ChallengeService, RateLimiter, StravaClient};
use challenge_tracker::store::{KvStore, MemoryStore};
use challenge_tracker::AppState;
use std::sync::Arc;

/// Create a test app backed by an in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_base_url("http://127.0.0.1:1")
}

/// Create a test app whose Strava client points at `base_url`.
///
/// The default unroutable address makes any accidental upstream call fail
/// fast instead of hitting the real API.
#[allow(dead_code)]
pub fn create_test_app_with_base_url(base_url: &str) -> (axum::Router, Arc<AppState>) {
    let (app, state, _store) = create_test_app_with_store(base_url);
    (app, state)
}

/// Same as [`create_test_app_with_base_url`], but also hands back the
/// in-memory store so tests can seed cache or rate-limit records directly.
#[allow(dead_code)]
pub fn create_test_app_with_store(
    base_url: &str,
) -> (axum::Router, Arc<AppState>, Arc<MemoryStore>) {
    let config = Config::test_default();

    let memory = Arc::new(MemoryStore::new());
    let store: Option<Arc<dyn KvStore>> = Some(memory.clone());
    let cache = ChallengeCache::new(store.clone(), CacheConfig::default());
    let rate_limiter = RateLimiter::new(store, RateLimitConfig::default());

    let client = StravaClient::with_base_urls(
        config.strava_client_id.clone(),
        config.strava_client_secret.clone(),
        base_url.to_string(),
        format!("{}/oauth/token", base_url),
    );

    let challenge = ChallengeService::new(client, cache.clone(), rate_limiter, &config);

    let state = Arc::new(AppState {
        config,
        cache,
        challenge,
    });

    (create_router(state.clone()), state, memory)
}
