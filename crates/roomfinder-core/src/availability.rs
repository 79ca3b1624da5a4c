//! Room availability resolution.
//!
//! This module reconciles the room catalog with the day's scheduled events
//! and answers, for every room, whether it is free at a probe instant or for
//! a whole window, and when that state ends.
//!
//! A room is *occupied* at instant `t` if some event on it satisfies
//! `start <= t < end`. For an interval probe `[a, b)` a room is occupied if
//! any event overlaps the window (`start < b && end > a`), even one that
//! lies strictly inside it.
//!
//! Free rooms are resolved independently: the next event starting after the
//! probe ends the free period. A room with no such event is reported as
//! [`AvailabilityStatus::NoFurtherEvents`], never omitted.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::event::ScheduledEvent;
use crate::issue::DataIssue;
use crate::query::SizeFilter;
use crate::room::{Room, RoomNumber};
use crate::time::TimeWindow;

/// What the resolver checks rooms against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "at", rename_all = "snake_case")]
pub enum Probe {
    /// A single instant.
    Point(NaiveDateTime),
    /// A half-open window the room must be free for entirely.
    Interval(TimeWindow),
}

impl Probe {
    /// Checks whether the event makes its room unavailable for this probe.
    pub fn is_blocked_by(&self, event: &ScheduledEvent) -> bool {
        match self {
            Self::Point(t) => event.is_ongoing_at(*t),
            Self::Interval(window) => event.overlaps(window),
        }
    }

    /// Checks whether the event can end the free period of a free room.
    ///
    /// For a point probe the event must start strictly after the probe; an
    /// event starting exactly at the probe occupies it instead. For an
    /// interval the event may start exactly at the window end, since the
    /// window is half-open.
    fn is_next_candidate(&self, event: &ScheduledEvent) -> bool {
        match self {
            Self::Point(t) => event.start > *t,
            Self::Interval(window) => event.start >= window.end,
        }
    }
}

/// Resolved state of one room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AvailabilityStatus {
    /// Free until the next event starts.
    FreeUntil {
        /// Start of the next event.
        until: NaiveDateTime,
        /// End of the next event.
        next_end: NaiveDateTime,
        /// Subject of the next event.
        subject: String,
    },
    /// Occupied; the busy period ends at `until`.
    BusyUntil {
        /// End of the contiguous run of events that holds the latest-starting
        /// blocking event. For an interval probe the room is free from here
        /// to the window end; earlier free gaps inside the window are not
        /// reported.
        until: NaiveDateTime,
        /// Subject of the first blocking event.
        subject: String,
    },
    /// Free and nothing else is scheduled in the room that day.
    NoFurtherEvents,
}

impl AvailabilityStatus {
    /// Returns true for both free variants.
    pub fn is_free(&self) -> bool {
        !matches!(self, Self::BusyUntil { .. })
    }
}

/// One room together with its resolved status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityRow {
    /// The room and its static attributes.
    pub room: Room,
    /// The resolved status.
    #[serde(flatten)]
    pub status: AvailabilityStatus,
}

impl AvailabilityRow {
    /// Shortcut for the room number.
    pub fn number(&self) -> &RoomNumber {
        &self.room.number
    }

    /// Returns true if the room is free for the probe.
    pub fn is_free(&self) -> bool {
        self.status.is_free()
    }
}

/// Output of [`resolve_with_issues`].
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// One row per distinct catalog room, in catalog order.
    pub rows: Vec<AvailabilityRow>,
    /// Events that could not be routed to a catalog room.
    pub issues: Vec<DataIssue>,
}

/// Resolves every room against the probe.
///
/// Returns exactly one row per distinct room number in `rooms`, in catalog
/// order. Events referencing rooms absent from the catalog are dropped.
pub fn resolve(rooms: &[Room], events: &[ScheduledEvent], probe: &Probe) -> Vec<AvailabilityRow> {
    resolve_with_issues(rooms, events, probe).rows
}

/// Like [`resolve`], but also reports the dropped events.
pub fn resolve_with_issues(
    rooms: &[Room],
    events: &[ScheduledEvent],
    probe: &Probe,
) -> Resolution {
    let catalog: HashSet<&RoomNumber> = rooms.iter().map(|r| &r.number).collect();

    // Group events per room, keeping input order inside each group.
    let mut by_room: HashMap<&RoomNumber, Vec<&ScheduledEvent>> = HashMap::new();
    let mut issues = Vec::new();
    for event in events {
        if catalog.contains(&event.room) {
            by_room.entry(&event.room).or_default().push(event);
        } else {
            debug!(room = %event.room, subject = %event.subject, "Dropping event for unknown room");
            issues.push(DataIssue::UnknownRoomReference {
                room: event.room.clone(),
                subject: event.subject.clone(),
            });
        }
    }

    if !issues.is_empty() {
        warn!(
            count = issues.len(),
            "Events reference rooms missing from the catalog"
        );
    }

    let mut seen = HashSet::new();
    let mut rows = Vec::with_capacity(rooms.len());
    for room in rooms {
        if !seen.insert(&room.number) {
            debug!(room = %room.number, "Skipping duplicate catalog entry");
            continue;
        }

        let room_events = by_room.get(&room.number).map(Vec::as_slice).unwrap_or(&[]);
        rows.push(AvailabilityRow {
            room: room.clone(),
            status: resolve_room(room_events, probe),
        });
    }

    debug!(
        rooms = rows.len(),
        free = rows.iter().filter(|r| r.is_free()).count(),
        "Resolved availability"
    );

    Resolution { rows, issues }
}

/// Resolves one room given its events.
fn resolve_room(events: &[&ScheduledEvent], probe: &Probe) -> AvailabilityStatus {
    let blocking: Vec<&ScheduledEvent> = events
        .iter()
        .copied()
        .filter(|e| probe.is_blocked_by(e))
        .collect();

    let first = blocking.iter().min_by_key(|e| e.start);
    let last = blocking.iter().max_by_key(|e| e.start);
    if let (Some(first), Some(last)) = (first, last) {
        return AvailabilityStatus::BusyUntil {
            until: busy_period_end(events, last.end),
            subject: first.subject.clone(),
        };
    }

    // min_by_key keeps the first of equal keys, so ties go to input order.
    match events
        .iter()
        .filter(|e| probe.is_next_candidate(e))
        .min_by_key(|e| e.start)
    {
        Some(next) => AvailabilityStatus::FreeUntil {
            until: next.start,
            next_end: next.end,
            subject: next.subject.clone(),
        },
        None => AvailabilityStatus::NoFurtherEvents,
    }
}

/// Extends `until` across events that start before it ends.
fn busy_period_end(events: &[&ScheduledEvent], mut until: NaiveDateTime) -> NaiveDateTime {
    let mut sorted: Vec<&ScheduledEvent> = events.to_vec();
    sorted.sort_by_key(|e| e.start);

    for event in sorted {
        if event.start > until {
            break;
        }
        if event.end > until {
            until = event.end;
        }
    }

    until
}

/// Keeps only the rows of rooms that are free for the probe.
pub fn free_rows(rows: Vec<AvailabilityRow>) -> Vec<AvailabilityRow> {
    rows.into_iter().filter(AvailabilityRow::is_free).collect()
}

/// Drops rows whose room capacity does not pass the size filter.
pub fn apply_size_filter(rows: Vec<AvailabilityRow>, size: SizeFilter) -> Vec<AvailabilityRow> {
    rows.into_iter()
        .filter(|row| size.admits(row.room.capacity))
        .collect()
}
