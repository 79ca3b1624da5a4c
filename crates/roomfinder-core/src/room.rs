//! Room catalog types.
//!
//! - [`RoomNumber`]: a validated canonical room number such as `09-010` or
//!   `01-U102`
//! - [`Room`]: one physical room, possibly registered under several system IDs
//! - [`Position`]: optional indoor-map geometry

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Matches a canonical room number anywhere inside a display name.
static ROOM_NUMBER_SEARCH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d{2}-U?\d{3,4}\b").expect("Invalid room number search regex")
});

/// Matches a string that is exactly one canonical room number.
static ROOM_NUMBER_EXACT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}-U?\d{3,4}$").expect("Invalid room number regex"));

/// Error returned when a string is not a canonical room number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a canonical room number: {0:?}")]
pub struct RoomNumberError(pub String);

/// A canonical room number of the form `NN-[U]NNN[N]`.
///
/// The leading two digits name the building, the optional `U` marks an
/// underground floor.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoomNumber(String);

impl RoomNumber {
    /// Parses a string that must be exactly one canonical room number.
    pub fn parse(value: &str) -> Result<Self, RoomNumberError> {
        if ROOM_NUMBER_EXACT.is_match(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(RoomNumberError(value.to_string()))
        }
    }

    /// Returns true if a room number appears anywhere in the text.
    pub fn is_mentioned_in(text: &str) -> bool {
        ROOM_NUMBER_SEARCH.is_match(text)
    }

    /// Extracts the canonical room number from a display name.
    ///
    /// The name must mention a room number somewhere; the canonical number is
    /// the token before the first whitespace or `/`, with any leading `#`
    /// removed. The token is validated again so names like `Foyer 01-101`
    /// are rejected rather than producing a bogus key.
    pub fn from_display_name(name: &str) -> Result<Self, RoomNumberError> {
        if !Self::is_mentioned_in(name) {
            return Err(RoomNumberError(name.to_string()));
        }

        let token = name
            .trim()
            .split(|c: char| c.is_whitespace() || c == '/')
            .next()
            .unwrap_or_default()
            .trim_start_matches('#');

        Self::parse(token)
    }

    /// Returns the room number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RoomNumber {
    type Err = RoomNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s.trim())
    }
}

impl TryFrom<String> for RoomNumber {
    type Error = RoomNumberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RoomNumber> for String {
    fn from(value: RoomNumber) -> Self {
        value.0
    }
}

/// A point on the indoor map.
///
/// `x` and `y` are horizontal map coordinates, `z` is the floor level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    /// Creates a new position.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// One physical room of the campus.
///
/// A room may be registered upstream under several system IDs; all of them
/// map to the single canonical [`RoomNumber`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Canonical room number, the natural key.
    pub number: RoomNumber,
    /// Every upstream system ID registered for this room.
    pub system_ids: BTreeSet<String>,
    /// Seating capacity, if any record reported one.
    pub capacity: Option<u32>,
    /// Floor as reported by the directory.
    pub floor: Option<String>,
    /// Indoor-map position, when the directory provides geometry.
    pub position: Option<Position>,
    /// Stable map-location identifier (point of interest).
    pub map_id: Option<u64>,
}

impl Room {
    /// Creates a room with the given number and no attributes.
    pub fn new(number: RoomNumber) -> Self {
        Self {
            number,
            system_ids: BTreeSet::new(),
            capacity: None,
            floor: None,
            position: None,
            map_id: None,
        }
    }

    /// Builder method to add a system ID.
    pub fn with_system_id(mut self, id: impl Into<String>) -> Self {
        self.system_ids.insert(id.into());
        self
    }

    /// Builder method to set the capacity.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Builder method to set the floor.
    pub fn with_floor(mut self, floor: impl Into<String>) -> Self {
        self.floor = Some(floor.into());
        self
    }

    /// Builder method to set the position.
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Builder method to set the map-location identifier.
    pub fn with_map_id(mut self, map_id: u64) -> Self {
        self.map_id = Some(map_id);
        self
    }
}
