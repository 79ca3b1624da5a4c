//! Time types for availability queries.
//!
//! All instants are campus-local wall-clock date-times ([`NaiveDateTime`]),
//! which is how the scheduling feed reports them. This module provides
//! [`TimeWindow`] for half-open query ranges plus a few helpers for building
//! the default query window.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Start of the study day used by the room day plan.
pub const STUDY_DAY_START: NaiveTime = match NaiveTime::from_hms_opt(7, 0, 0) {
    Some(t) => t,
    None => NaiveTime::MIN,
};

/// End of the study day used by the room day plan.
pub const STUDY_DAY_END: NaiveTime = match NaiveTime::from_hms_opt(22, 0, 0) {
    Some(t) => t,
    None => NaiveTime::MIN,
};

/// A half-open interval `[start, end)` of campus-local date-times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Start of the window (inclusive).
    pub start: NaiveDateTime,
    /// End of the window (exclusive).
    pub end: NaiveDateTime,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// # Panics
    ///
    /// Panics if `start` is after `end`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        assert!(start <= end, "TimeWindow start must be <= end");
        Self { start, end }
    }

    /// Creates a time window, returning `None` if `start` is after `end`.
    pub fn checked(start: NaiveDateTime, end: NaiveDateTime) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Creates the window covering one calendar day: `[date 00:00, date+1 00:00)`.
    pub fn for_date(date: NaiveDate) -> Self {
        let start = date.and_time(NaiveTime::MIN);
        Self {
            start,
            end: start + Duration::days(1),
        }
    }

    /// Creates a window between two times of day on the given date.
    pub fn on_date(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Option<Self> {
        Self::checked(date.and_time(start), date.and_time(end))
    }

    /// Checks if a date-time falls within this window.
    ///
    /// Uses half-open interval semantics: `[start, end)`.
    pub fn contains(&self, dt: NaiveDateTime) -> bool {
        self.start <= dt && dt < self.end
    }

    /// Checks if the span `[start, end)` overlaps this window.
    ///
    /// A span overlaps if it starts before the window ends AND ends after the
    /// window starts. Touching at a boundary is not an overlap.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        start < self.end && end > self.start
    }
}

/// Default end of the landing-page query window.
///
/// Adds thirty minutes to `now`, truncates to the full hour and adds one more
/// hour, so the window is always at least half an hour long.
pub fn default_window_end(now: NaiveDateTime) -> NaiveDateTime {
    let shifted = now + Duration::minutes(30);
    let truncated = shifted
        .date()
        .and_time(NaiveTime::from_hms_opt(shifted.hour(), 0, 0).unwrap_or(NaiveTime::MIN));
    truncated + Duration::hours(1)
}

/// Truncates a time of day to whole minutes.
pub fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    mod time_window {
        use super::*;

        #[test]
        fn creation() {
            let window = TimeWindow::new(dt(2025, 3, 4, 9, 0), dt(2025, 3, 4, 17, 0));
            assert_eq!(window.start, dt(2025, 3, 4, 9, 0));
            assert_eq!(window.end, dt(2025, 3, 4, 17, 0));
        }

        #[test]
        #[should_panic(expected = "start must be <= end")]
        fn invalid_window() {
            TimeWindow::new(dt(2025, 3, 4, 17, 0), dt(2025, 3, 4, 9, 0));
        }

        #[test]
        fn checked_rejects_inverted() {
            assert!(TimeWindow::checked(dt(2025, 3, 4, 17, 0), dt(2025, 3, 4, 9, 0)).is_none());
            assert!(TimeWindow::checked(dt(2025, 3, 4, 9, 0), dt(2025, 3, 4, 9, 0)).is_some());
        }

        #[test]
        fn contains_is_half_open() {
            let window = TimeWindow::new(dt(2025, 3, 4, 9, 0), dt(2025, 3, 4, 10, 0));

            assert!(window.contains(dt(2025, 3, 4, 9, 0)));
            assert!(window.contains(dt(2025, 3, 4, 9, 59)));
            assert!(!window.contains(dt(2025, 3, 4, 10, 0)));
            assert!(!window.contains(dt(2025, 3, 4, 8, 59)));
        }

        #[test]
        fn overlaps() {
            let window = TimeWindow::new(dt(2025, 3, 4, 9, 0), dt(2025, 3, 4, 11, 0));

            // Fully inside
            assert!(window.overlaps(dt(2025, 3, 4, 10, 30), dt(2025, 3, 4, 10, 45)));
            // Starts before, ends inside
            assert!(window.overlaps(dt(2025, 3, 4, 8, 0), dt(2025, 3, 4, 9, 30)));
            // Contains the window
            assert!(window.overlaps(dt(2025, 3, 4, 8, 0), dt(2025, 3, 4, 12, 0)));
            // Ends at window start
            assert!(!window.overlaps(dt(2025, 3, 4, 8, 0), dt(2025, 3, 4, 9, 0)));
            // Starts at window end
            assert!(!window.overlaps(dt(2025, 3, 4, 11, 0), dt(2025, 3, 4, 12, 0)));
        }

        #[test]
        fn for_date() {
            let window = TimeWindow::for_date(date(2025, 3, 4));
            assert_eq!(window.start, dt(2025, 3, 4, 0, 0));
            assert_eq!(window.end, dt(2025, 3, 5, 0, 0));
        }

        #[test]
        fn on_date() {
            let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
            let ten = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
            let window = TimeWindow::on_date(date(2025, 3, 4), nine, ten).unwrap();
            assert_eq!(window.start, dt(2025, 3, 4, 9, 0));
            assert!(TimeWindow::on_date(date(2025, 3, 4), ten, nine).is_none());
        }
    }

    #[test]
    fn default_end_rounds_past_next_hour() {
        assert_eq!(default_window_end(dt(2025, 3, 4, 10, 10)), dt(2025, 3, 4, 11, 0));
        assert_eq!(default_window_end(dt(2025, 3, 4, 10, 40)), dt(2025, 3, 4, 12, 0));
        assert_eq!(default_window_end(dt(2025, 3, 4, 23, 45)), dt(2025, 3, 5, 1, 0));
    }

    #[test]
    fn truncates_seconds() {
        let t = NaiveTime::from_hms_opt(9, 41, 27).unwrap();
        assert_eq!(truncate_to_minute(t), NaiveTime::from_hms_opt(9, 41, 0).unwrap());
    }
}
