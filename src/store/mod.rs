// SPDX-License-Identifier: MIT

//! Key-value store layer.
//!
//! The cache and the rate limiter share one store through the [`KvStore`]
//! seam. Production uses Redis; tests and local development use the
//! in-memory backend.

pub mod memory;
pub mod redis;

pub use memory::MemoryStore;
pub use redis::RedisStore;

use crate::error::AppError;
use async_trait::async_trait;

/// Store keys as constants.
pub mod keys {
    /// Cached challenge snapshot
    pub const CHALLENGE_CACHE: &str = "strava-challenge-data";
    /// Rate limit record
    pub const RATE_LIMIT: &str = "strava-rate-limit";
}

/// Minimal key-value contract the pipeline needs: get, put with TTL, delete.
///
/// Implementations must apply single-writer-per-key ordering (Redis command
/// ordering per connection satisfies this); the rate limiter tolerates lost
/// updates across writers but the cache must never resurrect deleted data.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;
    async fn put(&self, key: &str, value: String, ttl_secs: u64) -> Result<(), AppError>;
    async fn delete(&self, key: &str) -> Result<(), AppError>;
}
