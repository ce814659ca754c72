// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod cache;
pub mod calculator;
pub mod challenge;
pub mod rate_limit;
pub mod strava;

pub use cache::ChallengeCache;
pub use challenge::ChallengeService;
pub use rate_limit::{Admission, RateLimiter};
pub use strava::StravaClient;
