use chrono::{DateTime, Duration, Months, Utc};
use serde::Serialize;

/// Absolute time range, inclusive at both ends. `start <= end` always holds
/// for windows produced by [`resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start <= ts && ts <= self.end
    }
}

/// Relative period token from the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Day,
    Week,
    Month,
}

impl Period {
    /// Parses a period token. Absent or unrecognized tokens fall back to
    /// `Day`; this is the documented default, not an error.
    pub fn parse(token: Option<&str>) -> Self {
        match token {
            Some(t) if t.eq_ignore_ascii_case("week") => Period::Week,
            Some(t) if t.eq_ignore_ascii_case("month") => Period::Month,
            Some(t) if t.eq_ignore_ascii_case("day") => Period::Day,
            _ => Period::Day,
        }
    }
}

/// Converts a period token into an absolute window ending at `now`.
///
/// `month` subtracts one calendar month; when the day-of-month does not exist
/// in the target month the date is clamped to that month's last valid day
/// (Mar 31 -> Feb 28, or Feb 29 in a leap year). Pure function of its inputs.
pub fn resolve(period: Period, now: DateTime<Utc>) -> TimeWindow {
    let start = match period {
        Period::Day => now - Duration::days(1),
        Period::Week => now - Duration::days(7),
        Period::Month => now
            .checked_sub_months(Months::new(1))
            .unwrap_or_else(|| now - Duration::days(30)),
    };

    TimeWindow { start, end: now }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn week_window_is_exactly_seven_days() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let window = resolve(Period::Week, now);

        assert_eq!(window.end, now);
        assert_eq!(window.end - window.start, Duration::days(7));
    }

    #[test]
    fn day_window_is_exactly_one_day() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let window = resolve(Period::Day, now);

        assert_eq!(window.end - window.start, Duration::days(1));
    }

    #[test]
    fn month_window_clamps_at_month_end() {
        // March 31 minus one calendar month clamps to the last day of February
        let now = Utc.with_ymd_and_hms(2025, 3, 31, 10, 30, 0).unwrap();
        let window = resolve(Period::Month, now);

        assert_eq!(
            window.start,
            Utc.with_ymd_and_hms(2025, 2, 28, 10, 30, 0).unwrap()
        );
        assert_eq!(window.end, now);
    }

    #[test]
    fn month_window_clamps_to_leap_day() {
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 0, 0, 0).unwrap();
        let window = resolve(Period::Month, now);

        assert_eq!(
            window.start,
            Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn month_window_keeps_valid_days() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 8, 0, 0).unwrap();
        let window = resolve(Period::Month, now);

        assert_eq!(
            window.start,
            Utc.with_ymd_and_hms(2024, 5, 15, 8, 0, 0).unwrap()
        );
    }

    #[test]
    fn resolve_is_deterministic() {
        let now = Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap();
        assert_eq!(resolve(Period::Month, now), resolve(Period::Month, now));
    }

    #[test]
    fn unrecognized_token_defaults_to_day() {
        assert_eq!(Period::parse(None), Period::Day);
        assert_eq!(Period::parse(Some("fortnight")), Period::Day);
        assert_eq!(Period::parse(Some("")), Period::Day);
    }

    #[test]
    fn tokens_parse_case_insensitively() {
        assert_eq!(Period::parse(Some("week")), Period::Week);
        assert_eq!(Period::parse(Some("Month")), Period::Month);
        assert_eq!(Period::parse(Some("DAY")), Period::Day);
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let window = resolve(Period::Day, now);

        assert!(window.contains(window.start));
        assert!(window.contains(window.end));
        assert!(!window.contains(window.start - Duration::seconds(1)));
        assert!(!window.contains(window.end + Duration::seconds(1)));
    }
}
