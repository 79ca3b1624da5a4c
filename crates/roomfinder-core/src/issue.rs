//! Data-quality signals.
//!
//! Upstream feeds are partial and sometimes inconsistent. Records that cannot
//! be used are dropped, never fatal; each drop is described by a [`DataIssue`]
//! so callers can log or count them.

use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;
use thiserror::Error;

use crate::room::RoomNumber;

/// Which feed a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Room,
    Event,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Room => f.write_str("room"),
            Self::Event => f.write_str("event"),
        }
    }
}

/// A record that was dropped while building the canonical datasets.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum DataIssue {
    /// A record failed pattern or format validation.
    #[error("malformed {kind} record {record:?}: {reason}")]
    MalformedRecord {
        kind: RecordKind,
        record: String,
        reason: String,
    },

    /// An event whose end is not after its start.
    #[error("event in {room} ends at {end} but starts at {start}")]
    InvertedInterval {
        room: RoomNumber,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    /// An event that references a room absent from the catalog.
    #[error("event {subject:?} references unknown room {room}")]
    UnknownRoomReference { room: RoomNumber, subject: String },
}

impl DataIssue {
    /// Creates a malformed-record issue.
    pub fn malformed(
        kind: RecordKind,
        record: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedRecord {
            kind,
            record: record.into(),
            reason: reason.into(),
        }
    }

    /// Short machine-readable name of the issue.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MalformedRecord { .. } => "malformed_record",
            Self::InvertedInterval { .. } => "inverted_interval",
            Self::UnknownRoomReference { .. } => "unknown_room_reference",
        }
    }
}
