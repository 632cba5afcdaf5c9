// Rango - a category and page directory built with Rust
// Copyright (C) 2026 Rango Project Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Visit tracking over per-session key/value state.
//!
//! A session carries two keys: `visits`, a stringified counter, and
//! `last_visit`, a timestamp stored with fractional seconds. The counter
//! bumps once per elapsed whole day, measured as wall-clock duration
//! rather than calendar date: a visit at 23:59 followed by one at 00:01
//! the next day does not count as a new day until more than 24 hours
//! have passed.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::models::session::SessionData;

pub const VISITS_KEY: &str = "visits";
pub const LAST_VISIT_KEY: &str = "last_visit";

/// Stored timestamp layout, with a trailing fractional-seconds segment
/// that is truncated again on read.
const STORE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";
const PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a timestamp the way it is stored in session state
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(STORE_FORMAT).to_string()
}

/// Parse a stored timestamp, discarding the fractional-seconds segment
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let truncated = match raw.find('.') {
        Some(pos) => &raw[..pos],
        None => raw,
    };

    NaiveDateTime::parse_from_str(truncated, PARSE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Update the visit count and last-visit timestamp held in session state.
///
/// Missing keys fall back to their defaults (`visits` = 1, `last_visit` =
/// now). When more than a whole day has elapsed since the last visit the
/// counter is incremented and `last_visit` reset to now; otherwise the
/// original `last_visit` string is written back unchanged. Both keys are
/// always present in the map afterwards. Returns the resulting count.
pub fn track_visit(data: &mut SessionData, now: DateTime<Utc>) -> i64 {
    let mut visits: i64 = data
        .get(VISITS_KEY)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(1);

    let last_visit_raw = data
        .get(LAST_VISIT_KEY)
        .cloned()
        .unwrap_or_else(|| format_timestamp(now));

    let last_visit_time = parse_timestamp(&last_visit_raw).unwrap_or(now);

    if (now - last_visit_time).num_days() > 0 {
        visits += 1;
        data.insert(LAST_VISIT_KEY.to_string(), format_timestamp(now));
    } else {
        data.insert(LAST_VISIT_KEY.to_string(), last_visit_raw);
    }

    data.insert(VISITS_KEY.to_string(), visits.to_string());

    visits
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_first_visit_defaults() {
        let mut data = SessionData::new();
        let now = Utc::now();

        let visits = track_visit(&mut data, now);

        assert_eq!(visits, 1);
        assert_eq!(data.get(VISITS_KEY).unwrap(), "1");

        // last_visit is set to "now" within tolerance
        let stored = parse_timestamp(data.get(LAST_VISIT_KEY).unwrap()).unwrap();
        assert!((now - stored).num_seconds().abs() <= 1);
    }

    #[test]
    fn test_visit_after_25_hours_increments() {
        let now = Utc::now();
        let mut data = SessionData::new();
        data.insert(VISITS_KEY.to_string(), "3".to_string());
        data.insert(
            LAST_VISIT_KEY.to_string(),
            format_timestamp(now - Duration::hours(25)),
        );

        let visits = track_visit(&mut data, now);

        assert_eq!(visits, 4);
        assert_eq!(data.get(VISITS_KEY).unwrap(), "4");

        let stored = parse_timestamp(data.get(LAST_VISIT_KEY).unwrap()).unwrap();
        assert!((now - stored).num_seconds().abs() <= 1);
    }

    #[test]
    fn test_visit_after_2_hours_unchanged() {
        let now = Utc::now();
        let original = format_timestamp(now - Duration::hours(2));

        let mut data = SessionData::new();
        data.insert(VISITS_KEY.to_string(), "3".to_string());
        data.insert(LAST_VISIT_KEY.to_string(), original.clone());

        let visits = track_visit(&mut data, now);

        assert_eq!(visits, 3);
        assert_eq!(data.get(VISITS_KEY).unwrap(), "3");
        // The stored string is written back byte-for-byte
        assert_eq!(data.get(LAST_VISIT_KEY).unwrap(), &original);
    }

    #[test]
    fn test_day_boundary_is_elapsed_duration_not_calendar_date() {
        // 23:59 one day, 00:01 the next: under 24h elapsed, so no bump
        let last = "2026-08-06 23:59:00.000000".to_string();
        let now = parse_timestamp("2026-08-07 00:01:00").unwrap();

        let mut data = SessionData::new();
        data.insert(VISITS_KEY.to_string(), "5".to_string());
        data.insert(LAST_VISIT_KEY.to_string(), last);

        let visits = track_visit(&mut data, now);
        assert_eq!(visits, 5);
    }

    #[test]
    fn test_exactly_24_hours_is_a_new_day() {
        // Whole-day floor: exactly 24h elapsed already counts as one day
        let mut data = SessionData::new();
        data.insert(VISITS_KEY.to_string(), "2".to_string());
        data.insert(
            LAST_VISIT_KEY.to_string(),
            "2026-08-06 12:00:00.000000".to_string(),
        );

        let now = parse_timestamp("2026-08-07 12:00:00").unwrap();
        let visits = track_visit(&mut data, now);
        assert_eq!(visits, 3);
    }

    #[test]
    fn test_just_under_24_hours_is_not_a_new_day() {
        let mut data = SessionData::new();
        data.insert(VISITS_KEY.to_string(), "2".to_string());
        data.insert(
            LAST_VISIT_KEY.to_string(),
            "2026-08-06 12:00:00.000000".to_string(),
        );

        let now = parse_timestamp("2026-08-07 11:59:59").unwrap();
        let visits = track_visit(&mut data, now);
        assert_eq!(visits, 2);
    }

    #[test]
    fn test_missing_visits_defaults_to_one() {
        let now = Utc::now();
        let mut data = SessionData::new();
        data.insert(
            LAST_VISIT_KEY.to_string(),
            format_timestamp(now - Duration::hours(26)),
        );

        let visits = track_visit(&mut data, now);
        assert_eq!(visits, 2);
    }

    #[test]
    fn test_garbage_visits_value_treated_as_one() {
        let now = Utc::now();
        let mut data = SessionData::new();
        data.insert(VISITS_KEY.to_string(), "not-a-number".to_string());

        let visits = track_visit(&mut data, now);
        assert_eq!(visits, 1);
    }

    #[test]
    fn test_garbage_last_visit_treated_as_now() {
        let now = Utc::now();
        let mut data = SessionData::new();
        data.insert(VISITS_KEY.to_string(), "3".to_string());
        data.insert(LAST_VISIT_KEY.to_string(), "garbage".to_string());

        let visits = track_visit(&mut data, now);
        assert_eq!(visits, 3);
    }

    #[test]
    fn test_format_has_fractional_seconds() {
        let formatted = format_timestamp(Utc::now());
        assert!(formatted.contains('.'));

        // and parsing strips them again
        assert!(parse_timestamp(&formatted).is_some());
    }

    #[test]
    fn test_parse_timestamp_without_fraction() {
        assert!(parse_timestamp("2026-08-07 12:00:00").is_some());
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("2026-08-07").is_none());
    }
}
