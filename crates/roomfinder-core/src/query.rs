//! Availability queries.
//!
//! [`AvailabilityQuery`] is the explicit, immutable description of what the
//! user asked for: a date, a start time, an optional end time, a size filter
//! and an optional origin room. The caller owns it and may persist it however
//! it likes; the engine only reads it.

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::availability::Probe;
use crate::room::RoomNumber;
use crate::time::TimeWindow;

/// How far before or after today a query date may be.
pub const MAX_DATE_OFFSET_DAYS: i64 = 30;

/// Errors from building or validating a query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The input is not a `HH:MM` time.
    #[error("invalid time {0:?}, expected HH:MM")]
    InvalidTime(String),

    /// The input is not a `YYYY-MM-DD` date.
    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),

    /// The date is too far from today.
    #[error("date {date} is too far from {today}")]
    DateOutOfRange { date: NaiveDate, today: NaiveDate },

    /// The interval end is not after its start.
    #[error("window end {end} is not after start {start}")]
    EmptyWindow { start: NaiveTime, end: NaiveTime },
}

/// Upper bound on room capacity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeFilter {
    /// No bound.
    #[default]
    Unbounded,
    /// Rooms with at most this many seats.
    AtMost(u32),
}

impl SizeFilter {
    /// Builds a filter from an optional seat count.
    pub fn from_max_seats(max: Option<u32>) -> Self {
        max.map_or(Self::Unbounded, Self::AtMost)
    }

    /// Checks whether a room with the given capacity passes the filter.
    ///
    /// Rooms of unknown capacity only pass an unbounded filter.
    pub fn admits(&self, capacity: Option<u32>) -> bool {
        match (self, capacity) {
            (Self::Unbounded, _) => true,
            (Self::AtMost(max), Some(seats)) => seats <= *max,
            (Self::AtMost(_), None) => false,
        }
    }
}

/// A free-room query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    /// Day to query; `None` means today.
    pub date: Option<NaiveDate>,
    /// Start of the window, or the probe time of a point query.
    pub start: NaiveTime,
    /// End of the window; `None` makes this a point query.
    pub end: Option<NaiveTime>,
    /// Capacity filter applied after resolution.
    #[serde(default)]
    pub size: SizeFilter,
    /// Room to rank distances from.
    pub origin: Option<RoomNumber>,
}

impl AvailabilityQuery {
    /// Creates a point query at the given time of day.
    pub fn at(start: NaiveTime) -> Self {
        Self {
            date: None,
            start,
            end: None,
            size: SizeFilter::Unbounded,
            origin: None,
        }
    }

    /// Creates an interval query `[start, end)`.
    pub fn between(start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            end: Some(end),
            ..Self::at(start)
        }
    }

    /// Builder method to set the date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Builder method to set the size filter.
    pub fn with_size(mut self, size: SizeFilter) -> Self {
        self.size = size;
        self
    }

    /// Builder method to set the origin room.
    pub fn with_origin(mut self, origin: RoomNumber) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Returns true if this is a point query.
    pub fn is_point(&self) -> bool {
        self.end.is_none()
    }

    /// Returns the queried day, defaulting to `today`.
    pub fn day(&self, today: NaiveDate) -> NaiveDate {
        self.date.unwrap_or(today)
    }

    /// Builds the probe for the resolver.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::EmptyWindow`] if the end is not after the start.
    pub fn probe(&self, today: NaiveDate) -> Result<Probe, QueryError> {
        let day = self.day(today);
        match self.end {
            None => Ok(Probe::Point(day.and_time(self.start))),
            Some(end) if end > self.start => Ok(Probe::Interval(TimeWindow::new(
                day.and_time(self.start),
                day.and_time(end),
            ))),
            Some(end) => Err(QueryError::EmptyWindow {
                start: self.start,
                end,
            }),
        }
    }
}

/// Parses a `HH:MM` time of day.
pub fn parse_time(input: &str) -> Result<NaiveTime, QueryError> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M")
        .map_err(|_| QueryError::InvalidTime(input.to_string()))
}

/// Interprets the start-time input.
///
/// `now` (any case) and anything that is not a valid `HH:MM` fall back to
/// `now`.
pub fn parse_start(input: Option<&str>, now: NaiveTime) -> NaiveTime {
    match input.map(str::trim) {
        Some(s) if !s.eq_ignore_ascii_case("now") => parse_time(s).unwrap_or(now),
        _ => now,
    }
}

/// Interprets the end-time input; anything that is not `HH:MM` means no end.
pub fn parse_end(input: Option<&str>) -> Option<NaiveTime> {
    input.and_then(|s| parse_time(s).ok())
}

/// Parses and bounds-checks the date input; `None` means today.
///
/// # Errors
///
/// Returns an error for malformed dates and for dates more than
/// [`MAX_DATE_OFFSET_DAYS`] away from `today`.
pub fn parse_date(input: Option<&str>, today: NaiveDate) -> Result<NaiveDate, QueryError> {
    let Some(raw) = input else {
        return Ok(today);
    };

    let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| QueryError::InvalidDate(raw.to_string()))?;

    let offset = Duration::days(MAX_DATE_OFFSET_DAYS);
    if date < today - offset || date > today + offset {
        return Err(QueryError::DateOutOfRange { date, today });
    }

    Ok(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 4).unwrap()
    }

    mod size_filter {
        use super::*;

        #[test]
        fn unbounded_admits_everything() {
            assert!(SizeFilter::Unbounded.admits(Some(500)));
            assert!(SizeFilter::Unbounded.admits(None));
        }

        #[test]
        fn at_most_bounds_capacity() {
            let filter = SizeFilter::AtMost(40);
            assert!(filter.admits(Some(40)));
            assert!(filter.admits(Some(12)));
            assert!(!filter.admits(Some(41)));
            assert!(!filter.admits(None));
        }

        #[test]
        fn from_max_seats() {
            assert_eq!(SizeFilter::from_max_seats(None), SizeFilter::Unbounded);
            assert_eq!(SizeFilter::from_max_seats(Some(3)), SizeFilter::AtMost(3));
        }
    }

    mod probe {
        use super::*;

        #[test]
        fn point_query_uses_today() {
            let probe = AvailabilityQuery::at(t(9, 30)).probe(today()).unwrap();
            assert_eq!(probe, Probe::Point(today().and_time(t(9, 30))));
        }

        #[test]
        fn interval_query_uses_explicit_date() {
            let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
            let query = AvailabilityQuery::between(t(9, 0), t(11, 0)).with_date(date);
            let probe = query.probe(today()).unwrap();
            assert_eq!(
                probe,
                Probe::Interval(TimeWindow::new(date.and_time(t(9, 0)), date.and_time(t(11, 0))))
            );
        }

        #[test]
        fn empty_interval_is_rejected() {
            let err = AvailabilityQuery::between(t(11, 0), t(11, 0))
                .probe(today())
                .unwrap_err();
            assert!(matches!(err, QueryError::EmptyWindow { .. }));
        }
    }

    mod parsing {
        use super::*;

        #[test]
        fn start_falls_back_to_now() {
            let now = t(10, 17);
            assert_eq!(parse_start(None, now), now);
            assert_eq!(parse_start(Some("Now"), now), now);
            assert_eq!(parse_start(Some("garbage"), now), now);
            assert_eq!(parse_start(Some("25:00"), now), now);
            assert_eq!(parse_start(Some("08:15"), now), t(8, 15));
        }

        #[test]
        fn end_without_valid_time_means_point_query() {
            assert_eq!(parse_end(None), None);
            assert_eq!(parse_end(Some("")), None);
            assert_eq!(parse_end(Some("later")), None);
            assert_eq!(parse_end(Some("12:00")), Some(t(12, 0)));
        }

        #[test]
        fn date_defaults_to_today() {
            assert_eq!(parse_date(None, today()).unwrap(), today());
        }

        #[test]
        fn date_must_be_well_formed() {
            let err = parse_date(Some("04.03.2025"), today()).unwrap_err();
            assert_eq!(err, QueryError::InvalidDate("04.03.2025".to_string()));
        }

        #[test]
        fn date_must_be_within_range() {
            assert!(parse_date(Some("2025-04-03"), today()).is_ok());
            let err = parse_date(Some("2025-04-04"), today()).unwrap_err();
            assert!(matches!(err, QueryError::DateOutOfRange { .. }));
            assert!(parse_date(Some("2025-02-01"), today()).is_err());
        }
    }
}
