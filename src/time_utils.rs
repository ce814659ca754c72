// SPDX-License-Identifier: MIT

//! Shared helpers for date/time formatting and challenge-year boundaries.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Midnight UTC on January 1 of the given year.
pub fn start_of_year(year: i32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// 23:59:59 UTC on December 31 of the given year.
pub fn end_of_year(year: i32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, 12, 31, 23, 59, 59)
        .single()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_uses_z_suffix() {
        let dt = Utc.with_ymd_and_hms(2026, 3, 15, 9, 30, 0).unwrap();
        assert_eq!(format_utc_rfc3339(dt), "2026-03-15T09:30:00Z");
    }

    #[test]
    fn test_year_boundaries() {
        assert_eq!(
            format_utc_rfc3339(start_of_year(2026)),
            "2026-01-01T00:00:00Z"
        );
        assert_eq!(
            format_utc_rfc3339(end_of_year(2026)),
            "2026-12-31T23:59:59Z"
        );
    }
}
