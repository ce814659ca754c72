// SPDX-License-Identifier: MIT

//! Redis-backed key-value store.

use async_trait::async_trait;
use redis::AsyncCommands;

use crate::error::AppError;
use crate::store::KvStore;

/// Redis store. Connections are multiplexed per call; Redis command
/// ordering gives us the single-writer-per-key semantics the rate limiter
/// assumes.
#[derive(Clone)]
pub struct RedisStore {
    client: redis::Client,
}

impl RedisStore {
    pub fn new(redis_url: &str) -> Result<Self, AppError> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| AppError::Store(format!("Failed to create Redis client: {}", e)))?;
        Ok(Self { client })
    }

    /// Test the Redis connection.
    pub async fn ping(&self) -> Result<(), AppError> {
        let mut conn = self.conn().await?;
        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| AppError::Store(format!("Redis PING failed: {}", e)))?;
        Ok(())
    }

    async fn conn(&self) -> Result<redis::aio::MultiplexedConnection, AppError> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Store(format!("Redis connection failed: {}", e)))
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let mut conn = self.conn().await?;
        conn.get(key)
            .await
            .map_err(|e| AppError::Store(format!("Redis GET failed: {}", e)))
    }

    async fn put(&self, key: &str, value: String, ttl_secs: u64) -> Result<(), AppError> {
        let mut conn = self.conn().await?;
        let _: () = conn
            .set_ex(key, value, ttl_secs)
            .await
            .map_err(|e| AppError::Store(format!("Redis SETEX failed: {}", e)))?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        let mut conn = self.conn().await?;
        let _: usize = conn
            .del(key)
            .await
            .map_err(|e| AppError::Store(format!("Redis DEL failed: {}", e)))?;
        Ok(())
    }
}
