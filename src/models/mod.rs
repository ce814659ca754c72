// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod activity;
pub mod challenge;

pub use activity::{DailyStats, ProcessedActivity, RawActivity};
pub use challenge::{CacheEntry, ChallengeData, RateLimitRecord};
