// SPDX-License-Identifier: MIT

//! Strava activity records: raw upstream summaries and their processed,
//! display-ready counterparts.

use serde::{Deserialize, Serialize};

/// Activity summary as returned by the Strava activities endpoint.
///
/// Only the fields the challenge pipeline consumes are kept. Records that
/// fail to deserialize (missing `id`, `name`, `type` or `distance`) are
/// dropped during fetch; see `RawActivity::is_valid` for the numeric
/// constraints applied on top of deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawActivity {
    /// Strava activity ID
    pub id: u64,
    /// Activity name/title
    pub name: String,
    /// Sport type tag ("Run", "Walk", "Ride", ...)
    #[serde(rename = "type")]
    pub activity_type: String,
    /// Distance in meters
    pub distance: f64,
    /// Moving time in seconds
    #[serde(default)]
    pub moving_time: f64,
    /// Elapsed time in seconds
    #[serde(default)]
    pub elapsed_time: f64,
    /// Start timestamp in the athlete's local timezone (ISO 8601, no offset)
    #[serde(default)]
    pub start_date_local: String,
}

impl RawActivity {
    /// Constraints beyond what deserialization already enforces:
    /// a positive ID and a finite, non-negative distance.
    pub fn is_valid(&self) -> bool {
        self.id != 0 && self.distance.is_finite() && self.distance >= 0.0
    }
}

/// Simplified activity for display, one-to-one with a valid raw activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedActivity {
    pub id: u64,
    pub name: String,
    /// Calendar date in YYYY-MM-DD format
    pub date: String,
    /// Distance in km, rounded to one decimal
    pub distance_km: f64,
    /// Duration in whole minutes
    pub duration_minutes: i64,
    /// Pace in min/km, rounded to one decimal; 0 for zero-distance activities
    pub pace_min_per_km: f64,
}

/// Per-day aggregate for the calendar heatmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    /// Calendar date in YYYY-MM-DD format
    pub date: String,
    /// Total distance in km for the day
    pub distance_km: f64,
    /// Number of activities on the day
    pub activity_count: u32,
}
