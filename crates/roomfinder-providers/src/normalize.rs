//! Raw record to canonical type conversion.
//!
//! - [`normalize_rooms`]: directory records to one [`Room`] per canonical
//!   room number
//! - [`normalize_events`]: feed records to [`ScheduledEvent`]s inside a day
//!   window
//!
//! Neither function fails. Unusable records are dropped and reported in
//! [`Normalized::issues`].

use std::collections::HashMap;

use roomfinder_core::{
    DataIssue, Position, RecordKind, Room, RoomNumber, ScheduledEvent, TimeWindow,
};
use tracing::{debug, info, trace};

use crate::raw::{DecodedFeed, RawEventRecord, RawRoomRecord};

/// Canonical items plus the data issues met while building them.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized<T> {
    pub items: Vec<T>,
    pub issues: Vec<DataIssue>,
}

impl<T> Normalized<T> {
    /// Prepends issues found before normalization, such as decoding errors.
    pub fn with_prior_issues(mut self, mut prior: Vec<DataIssue>) -> Self {
        prior.append(&mut self.issues);
        self.issues = prior;
        self
    }
}

/// Builds the canonical room catalog from directory records.
///
/// Records whose display name mentions no room number are not rooms of
/// interest and are skipped without an issue. Records that mention one but
/// whose leading token is not a valid number are reported as malformed.
///
/// Records sharing a canonical number are merged: system IDs are collected,
/// the largest capacity wins, floor, position and map ID come from the first
/// record that has them. Catalog order follows the first appearance of each
/// number.
pub fn normalize_rooms(records: &[RawRoomRecord]) -> Normalized<Room> {
    let mut rooms: Vec<Room> = Vec::new();
    let mut index: HashMap<RoomNumber, usize> = HashMap::new();
    let mut issues = Vec::new();

    for record in records {
        let Some(name) = record.short_name.as_deref() else {
            trace!(id = ?record.id, "Skipping directory record without a name");
            continue;
        };

        if !RoomNumber::is_mentioned_in(name) {
            trace!(name, "Skipping non-room directory record");
            continue;
        }

        let number = match RoomNumber::from_display_name(name) {
            Ok(number) => number,
            Err(e) => {
                debug!(name, "Dropping malformed room record");
                issues.push(DataIssue::malformed(RecordKind::Room, name, e.to_string()));
                continue;
            }
        };

        let slot = *index.entry(number.clone()).or_insert_with(|| {
            rooms.push(Room::new(number));
            rooms.len() - 1
        });
        merge_record(&mut rooms[slot], record);
    }

    info!(
        records = records.len(),
        rooms = rooms.len(),
        malformed = issues.len(),
        "Normalized room directory"
    );

    Normalized {
        items: rooms,
        issues,
    }
}

fn merge_record(room: &mut Room, record: &RawRoomRecord) {
    if let Some(ref id) = record.id {
        room.system_ids.insert(id.to_string());
    }

    if let Some(seats) = record.capacity() {
        room.capacity = Some(room.capacity.map_or(seats, |c| c.max(seats)));
    }

    if room.floor.is_none() {
        room.floor = record.floor.as_ref().map(ToString::to_string);
    }

    if room.position.is_none() {
        room.position = record
            .coordinates()
            .zip(record.z)
            .map(|((x, y), z)| Position::new(x, y, z));
    }

    if room.map_id.is_none() {
        room.map_id = record.poi_id;
    }
}

/// Builds canonical events from feed records, keeping those that overlap
/// `window`.
///
/// Records without a usable room reference or timestamps are malformed;
/// records whose end is not after their start are inverted. Both are dropped
/// and reported.
pub fn normalize_events(records: &[RawEventRecord], window: &TimeWindow) -> Normalized<ScheduledEvent> {
    let mut events = Vec::with_capacity(records.len());
    let mut issues = Vec::new();
    let mut outside = 0usize;

    for record in records {
        match normalize_event(record) {
            Ok(event) if event.overlaps(window) => events.push(event),
            Ok(event) => {
                trace!(room = %event.room, start = %event.start, "Event outside requested window");
                outside += 1;
            }
            Err(issue) => {
                debug!(issue = %issue, "Dropping event record");
                issues.push(issue);
            }
        }
    }

    info!(
        records = records.len(),
        events = events.len(),
        dropped = issues.len(),
        outside,
        "Normalized event feed"
    );

    Normalized {
        items: events,
        issues,
    }
}

/// Converts one feed record.
pub fn normalize_event(record: &RawEventRecord) -> Result<ScheduledEvent, DataIssue> {
    let subject = record.description.clone().unwrap_or_default();

    let location = record.location.as_deref().map(str::trim).unwrap_or_default();
    let room = RoomNumber::from_display_name(location).map_err(|_| {
        DataIssue::malformed(
            RecordKind::Event,
            describe(record),
            format!("no room number in location {location:?}"),
        )
    })?;

    let (Some(start), Some(end)) = (record.start(), record.end()) else {
        return Err(DataIssue::malformed(
            RecordKind::Event,
            describe(record),
            "missing or unparsable start/end time",
        ));
    };

    ScheduledEvent::new(room.clone(), start, end, subject)
        .ok_or(DataIssue::InvertedInterval { room, start, end })
}

fn describe(record: &RawEventRecord) -> String {
    match (&record.description, &record.location) {
        (Some(d), Some(l)) => format!("{d} @ {l}"),
        (Some(d), None) => d.clone(),
        (None, Some(l)) => l.clone(),
        (None, None) => "<unnamed event>".to_string(),
    }
}

/// Normalizes a decoded room feed, carrying decoding rejections along.
pub fn normalize_room_feed(feed: &DecodedFeed<RawRoomRecord>) -> Normalized<Room> {
    normalize_rooms(&feed.records).with_prior_issues(feed.rejected.clone())
}

/// Normalizes a decoded event feed, carrying decoding rejections along.
pub fn normalize_event_feed(
    feed: &DecodedFeed<RawEventRecord>,
    window: &TimeWindow,
) -> Normalized<ScheduledEvent> {
    normalize_events(&feed.records, window).with_prior_issues(feed.rejected.clone())
}
