//! Raw feed records.
//!
//! These mirror the JSON returned by the campus API (and stored by the file
//! provider) before normalization. Every field is optional: upstream records
//! are partial, and a missing field must drop one record, not the whole feed.

use std::fmt;

use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use roomfinder_core::{DataIssue, RecordKind};

/// Timestamp format used by the event feed.
pub const FEED_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A JSON scalar that may arrive as a string or a number.
///
/// The directory is inconsistent about IDs, floors and seat counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(serde_json::Number),
}

impl Scalar {
    /// Reads the value as a non-negative whole count.
    ///
    /// `45`, `45.0` and `"45"` give 45; negative, fractional and
    /// non-numeric values give `None`.
    pub fn as_count(&self) -> Option<u32> {
        match self {
            Self::Text(s) => s.trim().parse().ok(),
            Self::Number(n) => n
                .as_u64()
                .or_else(|| {
                    n.as_f64()
                        .filter(|f| *f >= 0.0 && f.fract() == 0.0)
                        .map(|f| f as u64)
                })
                .and_then(|count| u32::try_from(count).ok()),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Map geometry of a room: `coordinates` is `[x, y]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawPoint {
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

/// One record of the room directory.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRoomRecord {
    /// System ID; one physical room may have several records.
    pub id: Option<Scalar>,
    /// Display name, e.g. `01-U102 Seminar room` or `#09-010`.
    pub short_name: Option<String>,
    pub floor: Option<Scalar>,
    /// Seat count; read through [`Self::capacity`].
    pub seats: Option<Scalar>,
    pub point: Option<RawPoint>,
    /// Floor level on the indoor map.
    pub z: Option<f64>,
    /// Map point-of-interest identifier.
    pub poi_id: Option<u64>,
}

impl RawRoomRecord {
    /// Creates a record with just a display name.
    pub fn named(short_name: impl Into<String>) -> Self {
        Self {
            short_name: Some(short_name.into()),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(Scalar::Text(id.into()));
        self
    }

    pub fn with_seats(mut self, seats: u32) -> Self {
        self.seats = Some(Scalar::Number(seats.into()));
        self
    }

    pub fn with_floor(mut self, floor: impl Into<String>) -> Self {
        self.floor = Some(Scalar::Text(floor.into()));
        self
    }

    pub fn with_geometry(mut self, x: f64, y: f64, z: f64) -> Self {
        self.point = Some(RawPoint {
            coordinates: vec![x, y],
        });
        self.z = Some(z);
        self
    }

    pub fn with_poi_id(mut self, poi_id: u64) -> Self {
        self.poi_id = Some(poi_id);
        self
    }

    /// Seat count, `None` when missing or unusable.
    pub fn capacity(&self) -> Option<u32> {
        self.seats.as_ref().and_then(Scalar::as_count)
    }

    /// Returns `(x, y)` when the point carries two coordinates.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match self.point.as_ref()?.coordinates.as_slice() {
            [x, y, ..] => Some((*x, *y)),
            _ => None,
        }
    }
}

/// Room details embedded in an event record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawEventRoom {
    pub seats: Option<Scalar>,
}

/// One record of the event feed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEventRecord {
    /// Room reference as free text; normally a canonical room number.
    pub location: Option<String>,
    pub room: Option<RawEventRoom>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub description: Option<String>,
}

impl RawEventRecord {
    /// Creates a record for the given location and times.
    pub fn new(
        location: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            location: Some(location.into()),
            room: None,
            start_time: Some(start_time.into()),
            end_time: Some(end_time.into()),
            description: Some(description.into()),
        }
    }

    /// Parsed start time, if present and well-formed.
    pub fn start(&self) -> Option<NaiveDateTime> {
        self.start_time.as_deref().and_then(parse_timestamp)
    }

    /// Parsed end time, if present and well-formed.
    pub fn end(&self) -> Option<NaiveDateTime> {
        self.end_time.as_deref().and_then(parse_timestamp)
    }
}

/// Parses a feed timestamp, tolerating fractional seconds.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, FEED_TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
}

/// Records decoded from a feed, plus the ones that could not be decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedFeed<T> {
    pub records: Vec<T>,
    pub rejected: Vec<DataIssue>,
}

impl<T> Default for DecodedFeed<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

impl<T> DecodedFeed<T> {
    /// Wraps records that needed no decoding.
    pub fn with_records(records: Vec<T>) -> Self {
        Self {
            records,
            rejected: Vec::new(),
        }
    }
}

/// Decodes a JSON array record by record.
///
/// A record that does not fit `T` is rejected on its own; the rest of the
/// feed survives.
pub fn decode_records<T: DeserializeOwned>(values: Vec<Value>, kind: RecordKind) -> DecodedFeed<T> {
    let mut feed = DecodedFeed::default();

    for value in values {
        match serde_json::from_value::<T>(value.clone()) {
            Ok(record) => feed.records.push(record),
            Err(e) => {
                debug!(%kind, error = %e, "Rejecting undecodable record");
                feed.rejected
                    .push(DataIssue::malformed(kind, value.to_string(), e.to_string()));
            }
        }
    }

    feed
}
