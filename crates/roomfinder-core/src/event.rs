//! Scheduled events.
//!
//! [`ScheduledEvent`] is the canonical form of one entry of the class
//! schedule: a room reference, a half-open `[start, end)` span and a subject.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::room::RoomNumber;
use crate::time::TimeWindow;

/// One scheduled event in a room.
///
/// Events carry no identity of their own; they exist for the duration of one
/// resolution. `end > start` holds for every event built through
/// [`ScheduledEvent::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    /// The room this event takes place in.
    pub room: RoomNumber,
    /// When the event starts (inclusive).
    pub start: NaiveDateTime,
    /// When the event ends (exclusive).
    pub end: NaiveDateTime,
    /// Subject or description text, verbatim from the feed.
    pub subject: String,
}

impl ScheduledEvent {
    /// Creates a new event, returning `None` when `end` is not after `start`.
    pub fn new(
        room: RoomNumber,
        start: NaiveDateTime,
        end: NaiveDateTime,
        subject: impl Into<String>,
    ) -> Option<Self> {
        (end > start).then(|| Self {
            room,
            start,
            end,
            subject: subject.into(),
        })
    }

    /// Time-of-day component of the start.
    pub fn start_time(&self) -> NaiveTime {
        self.start.time()
    }

    /// Time-of-day component of the end.
    pub fn end_time(&self) -> NaiveTime {
        self.end.time()
    }

    /// Calendar date the event starts on.
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Returns true if the event ends on a later date than it starts.
    pub fn crosses_midnight(&self) -> bool {
        self.end.date() > self.start.date()
    }

    /// Checks if the event occupies its room at the given instant.
    pub fn is_ongoing_at(&self, t: NaiveDateTime) -> bool {
        self.start <= t && t < self.end
    }

    /// Checks if the event overlaps the given window.
    pub fn overlaps(&self, window: &TimeWindow) -> bool {
        window.overlaps(self.start, self.end)
    }
}
