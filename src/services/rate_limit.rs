// SPDX-License-Identifier: MIT

//! Sliding-window rate limiter guarding the Strava API quota.
//!
//! Two windows run against the same event stream: 15 minutes and 24 hours,
//! mirroring Strava's own two-tier limit. The check and the increment are a
//! single operation so concurrent requests cannot both observe "under
//! limit" and sail past the cap.
//!
//! Fail-open: a broken store allows the request with full quota reported.
//! Denying legitimate traffic over a storage hiccup is worse than
//! occasionally exceeding the upstream quota.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::config::RateLimitConfig;
use crate::models::RateLimitRecord;
use crate::store::{keys, KvStore};

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy)]
pub struct Admission {
    pub allowed: bool,
    /// Requests left in the short window
    pub remaining: usize,
}

/// Sliding-window admission control, state persisted in the key-value store.
#[derive(Clone)]
pub struct RateLimiter {
    store: Option<Arc<dyn KvStore>>,
    config: RateLimitConfig,
}

impl RateLimiter {
    pub fn new(store: Option<Arc<dyn KvStore>>, config: RateLimitConfig) -> Self {
        Self { store, config }
    }

    /// Atomically check the quota and record the request if admitted.
    pub async fn check_and_increment(&self) -> Admission {
        self.check_at(Utc::now()).await
    }

    async fn check_at(&self, now: DateTime<Utc>) -> Admission {
        let store = match &self.store {
            Some(store) => store,
            None => {
                tracing::warn!("Rate limit store not configured, allowing request");
                return self.full_quota();
            }
        };

        let now_ms = now.timestamp_millis();
        let window_start = now_ms - (self.config.window_secs as i64) * 1000;
        let day_start = now_ms - (self.config.daily_secs as i64) * 1000;

        let mut record = match store.get(keys::RATE_LIMIT).await {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Corrupt rate limit record, starting fresh");
                RateLimitRecord::default()
            }),
            Ok(None) => RateLimitRecord::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Rate limit read failed, allowing request");
                return self.full_quota();
            }
        };

        // Prune entries older than each window.
        record.fifteen_min.retain(|ts| *ts > window_start);
        record.daily.retain(|ts| *ts > day_start);

        // Storage-size safeguard only; pruning already decided correctness.
        if record.fifteen_min.len() > self.config.max_stored_timestamps {
            let excess = record.fifteen_min.len() - self.config.max_stored_timestamps;
            record.fifteen_min.drain(..excess);
        }

        let short_len = record.fifteen_min.len();
        if short_len >= self.config.window_cap || record.daily.len() >= self.config.daily_cap {
            let remaining = self.config.window_cap.saturating_sub(short_len);
            tracing::warn!(
                short_window = short_len,
                daily_window = record.daily.len(),
                "Rate limit reached, denying upstream call"
            );
            return Admission {
                allowed: false,
                remaining,
            };
        }

        record.fifteen_min.push(now_ms);
        record.daily.push(now_ms);

        let remaining = self
            .config
            .window_cap
            .saturating_sub(record.fifteen_min.len());

        match serde_json::to_string(&record) {
            Ok(raw) => {
                if let Err(e) = store.put(keys::RATE_LIMIT, raw, self.config.daily_secs).await {
                    tracing::warn!(error = %e, "Rate limit write failed, allowing anyway");
                }
            }
            Err(e) => tracing::error!(error = %e, "Failed to serialize rate limit record"),
        }

        Admission {
            allowed: true,
            remaining,
        }
    }

    fn full_quota(&self) -> Admission {
        Admission {
            allowed: true,
            remaining: self.config.window_cap,
        }
    }
}
