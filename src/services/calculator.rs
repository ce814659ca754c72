// SPDX-License-Identifier: MIT

//! Challenge statistics calculator.
//!
//! Pure functions reducing a list of raw activities plus a goal/year into a
//! complete [`ChallengeData`] snapshot. Never fails: an empty activity list
//! produces a zeroed snapshot, malformed dates fall back to the current
//! date with a warning.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::models::{ChallengeData, DailyStats, ProcessedActivity, RawActivity};
use crate::time_utils::{end_of_year, format_utc_rfc3339, start_of_year};

const SECONDS_PER_DAY: i64 = 86_400;

/// Fixed denominator for expected progress. Deliberately not leap-year
/// aware; the goal is km-per-calendar-year, not km-per-365.25-days.
const DAYS_PER_YEAR: f64 = 365.0;

/// Process activities into a challenge snapshot.
///
/// `now` is injected so the calendar math is testable; callers pass
/// `Utc::now()`.
pub fn process_activities(
    activities: &[RawActivity],
    goal_km: f64,
    challenge_year: i32,
    now: DateTime<Utc>,
) -> ChallengeData {
    let total_km: f64 = activities.iter().map(|a| meters_to_km(a.distance)).sum();

    let percent_complete = (total_km / goal_km) * 100.0;
    let remaining_km = (goal_km - total_km).max(0.0);
    let remaining_days = days_remaining(challenge_year, now);
    let days_elapsed = days_elapsed(challenge_year, now);

    let actual_daily_average = total_km / days_elapsed as f64;
    let km_per_day_needed = if remaining_days > 0 {
        remaining_km / remaining_days as f64
    } else {
        0.0
    };

    let expected_km_by_today = (days_elapsed as f64 / DAYS_PER_YEAR) * goal_km;
    let ahead_behind_km = total_km - expected_km_by_today;
    let is_on_track = total_km >= expected_km_by_today;

    ChallengeData {
        total_km: round1(total_km),
        goal_km,
        percent_complete: round1(percent_complete),
        remaining_km: round1(remaining_km),
        remaining_days,
        km_per_day_needed: round1(km_per_day_needed),
        days_elapsed,
        actual_daily_average: round1(actual_daily_average),
        expected_km_by_today: round1(expected_km_by_today),
        ahead_behind_km: round1(ahead_behind_km),
        is_on_track,
        activities: process_activity_list(activities, now),
        daily_stats: daily_stats(activities, now),
        last_updated: format_utc_rfc3339(now),
    }
}

/// Convert raw activities into display records, most recent first.
/// Same-date activities keep their input order (stable sort).
fn process_activity_list(activities: &[RawActivity], now: DateTime<Utc>) -> Vec<ProcessedActivity> {
    let mut processed: Vec<ProcessedActivity> = activities
        .iter()
        .map(|activity| {
            let distance_km = meters_to_km(activity.distance);
            let duration_minutes = seconds_to_minutes(activity.moving_time);

            ProcessedActivity {
                id: activity.id,
                name: activity.name.clone(),
                date: local_date(&activity.start_date_local, now),
                distance_km: round1(distance_km),
                duration_minutes: duration_minutes.round() as i64,
                pace_min_per_km: round1(pace(distance_km, duration_minutes)),
            }
        })
        .collect();

    processed.sort_by(|a, b| b.date.cmp(&a.date));
    processed
}

/// Aggregate per-day distance and counts, oldest first.
fn daily_stats(activities: &[RawActivity], now: DateTime<Utc>) -> Vec<DailyStats> {
    let mut daily: HashMap<String, (f64, u32)> = HashMap::new();

    for activity in activities {
        let date = local_date(&activity.start_date_local, now);
        let entry = daily.entry(date).or_insert((0.0, 0));
        entry.0 += meters_to_km(activity.distance);
        entry.1 += 1;
    }

    let mut stats: Vec<DailyStats> = daily
        .into_iter()
        .map(|(date, (distance_km, activity_count))| DailyStats {
            date,
            distance_km: round1(distance_km),
            activity_count,
        })
        .collect();

    // YYYY-MM-DD sorts chronologically as a plain string
    stats.sort_by(|a, b| a.date.cmp(&b.date));
    stats
}

/// Extract the YYYY-MM-DD portion of a local-time ISO 8601 timestamp,
/// without timezone arithmetic. Unrecognizable input falls back to the
/// current date.
fn local_date(raw: &str, now: DateTime<Utc>) -> String {
    if has_iso_datetime_prefix(raw) {
        raw[..10].to_string()
    } else {
        tracing::warn!(raw, "Invalid activity date format, using current date");
        now.format("%Y-%m-%d").to_string()
    }
}

/// Check for a literal `YYYY-MM-DDTHH:MM:SS` prefix.
fn has_iso_datetime_prefix(s: &str) -> bool {
    let b = s.as_bytes();
    if b.len() < 19 {
        return false;
    }
    let digits = |range: std::ops::Range<usize>| b[range].iter().all(|c| c.is_ascii_digit());
    digits(0..4)
        && b[4] == b'-'
        && digits(5..7)
        && b[7] == b'-'
        && digits(8..10)
        && b[10] == b'T'
        && digits(11..13)
        && b[13] == b':'
        && digits(14..16)
        && b[16] == b':'
        && digits(17..19)
}

/// Days since midnight UTC on January 1, floored, clamped to at least 1.
fn days_elapsed(year: i32, now: DateTime<Utc>) -> i64 {
    let elapsed = (now - start_of_year(year)).num_seconds() / SECONDS_PER_DAY;
    elapsed.max(1)
}

/// Days until 23:59:59 UTC on December 31, ceiled, clamped to at least 0.
fn days_remaining(year: i32, now: DateTime<Utc>) -> i64 {
    let secs = (end_of_year(year) - now).num_seconds();
    if secs <= 0 {
        0
    } else {
        (secs + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY
    }
}

fn meters_to_km(meters: f64) -> f64 {
    meters / 1000.0
}

fn seconds_to_minutes(seconds: f64) -> f64 {
    seconds / 60.0
}

/// Pace in min/km; exactly 0 for zero-distance activities, never NaN.
fn pace(distance_km: f64, duration_minutes: f64) -> f64 {
    if distance_km == 0.0 {
        return 0.0;
    }
    duration_minutes / distance_km
}

/// Round to one decimal place.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
