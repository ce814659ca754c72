// SPDX-License-Identifier: MIT

//! Challenge snapshot cache.
//!
//! One named slot in the key-value store. Logical validity is governed by
//! the entry's `expires_at`; the store-level TTL is a backstop. Every
//! failure path degrades toward recomputation: a broken store must never
//! take the request path down with it.

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

use crate::config::CacheConfig;
use crate::models::{CacheEntry, ChallengeData};
use crate::store::{keys, KvStore};

/// Read/write/invalidate access to the cached challenge snapshot.
#[derive(Clone)]
pub struct ChallengeCache {
    store: Option<Arc<dyn KvStore>>,
    config: CacheConfig,
}

impl ChallengeCache {
    pub fn new(store: Option<Arc<dyn KvStore>>, config: CacheConfig) -> Self {
        Self { store, config }
    }

    /// Read the cached snapshot, if present and unexpired.
    ///
    /// An expired entry is deleted as a side effect and reported as absent.
    /// Store errors are swallowed and reported as absent.
    pub async fn read(&self) -> Option<ChallengeData> {
        self.read_at(Utc::now()).await
    }

    async fn read_at(&self, now: DateTime<Utc>) -> Option<ChallengeData> {
        let store = match &self.store {
            Some(store) => store,
            None => {
                tracing::warn!("Cache store not configured");
                return None;
            }
        };

        let raw = match store.get(keys::CHALLENGE_CACHE).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "Cache read failed, treating as miss");
                return None;
            }
        };

        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "Corrupt cache entry, treating as miss");
                return None;
            }
        };

        if now > entry.expires_at {
            tracing::debug!("Cache entry expired, deleting");
            if let Err(e) = store.delete(keys::CHALLENGE_CACHE).await {
                tracing::warn!(error = %e, "Failed to delete expired cache entry");
            }
            return None;
        }

        tracing::debug!("Cache hit");
        Some(entry.data)
    }

    /// Unconditionally overwrite the slot with a fresh snapshot.
    /// Write failures are logged; a missing cache just means recomputation.
    pub async fn write(&self, data: &ChallengeData) {
        let store = match &self.store {
            Some(store) => store,
            None => {
                tracing::warn!("Cache store not configured, skipping write");
                return;
            }
        };

        let now = Utc::now();
        let entry = CacheEntry {
            data: data.clone(),
            created_at: now,
            expires_at: now + Duration::seconds(self.config.ttl_secs as i64),
        };

        let raw = match serde_json::to_string(&entry) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize cache entry");
                return;
            }
        };

        match store
            .put(keys::CHALLENGE_CACHE, raw, self.config.ttl_secs)
            .await
        {
            Ok(()) => tracing::debug!("Challenge data cached"),
            Err(e) => tracing::warn!(error = %e, "Cache write failed"),
        }
    }

    /// Delete the slot regardless of state. Never errors; an absent slot is
    /// already the desired outcome.
    pub async fn invalidate(&self) {
        let store = match &self.store {
            Some(store) => store,
            None => {
                tracing::warn!("Cache store not configured, nothing to invalidate");
                return;
            }
        };

        match store.delete(keys::CHALLENGE_CACHE).await {
            Ok(()) => tracing::info!("Challenge cache invalidated"),
            Err(e) => tracing::warn!(error = %e, "Cache invalidation failed"),
        }
    }
}
