// SPDX-License-Identifier: MIT

//! Challenge snapshot and the records persisted in the key-value store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{DailyStats, ProcessedActivity};

/// Complete computed challenge state.
///
/// Immutable once produced; a recomputation replaces the snapshot wholesale.
/// All derived distances and paces are rounded to one decimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeData {
    pub total_km: f64,
    pub goal_km: f64,
    pub percent_complete: f64,
    pub remaining_km: f64,
    pub remaining_days: i64,
    /// Required daily pace over the remaining days; 0 once the window closes
    pub km_per_day_needed: f64,
    pub days_elapsed: i64,
    pub actual_daily_average: f64,
    /// Where the total should be by today, against a fixed 365-day year
    pub expected_km_by_today: f64,
    /// Signed distance ahead of (positive) or behind (negative) schedule
    pub ahead_behind_km: f64,
    pub is_on_track: bool,
    /// Most recent first
    pub activities: Vec<ProcessedActivity>,
    /// Oldest first
    pub daily_stats: Vec<DailyStats>,
    /// RFC3339 UTC timestamp of the computation
    pub last_updated: String,
}

/// Cache slot contents: a snapshot plus its logical validity window.
///
/// `expires_at` governs validity; the store-level TTL is only a backstop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub data: ChallengeData,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Sliding-window rate limit state, persisted between invocations.
///
/// Both windows hold epoch-millisecond timestamps of admitted requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateLimitRecord {
    /// 15-minute window
    #[serde(default)]
    pub fifteen_min: Vec<i64>,
    /// 24-hour window
    #[serde(default)]
    pub daily: Vec<i64>,
}
