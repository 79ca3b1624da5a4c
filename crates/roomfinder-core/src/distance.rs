//! Distance ranking of resolved rooms.
//!
//! Rooms are ranked by the straight-line distance from an origin room on the
//! indoor map. Floor differences are weighted by a scale factor so a room one
//! floor up is "further" than a room a few metres away on the same level.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::availability::AvailabilityRow;
use crate::room::{Position, Room};

/// Default weight of one floor level relative to horizontal map units.
pub const DEFAULT_FLOOR_SCALE: f64 = 5.0;

/// What to do with rows whose distance cannot be computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unpositioned {
    /// Keep them, after every ranked row.
    #[default]
    Last,
    /// Drop them.
    Exclude,
}

/// A resolved row with its distance from the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRow {
    #[serde(flatten)]
    pub row: AvailabilityRow,
    /// Distance from the origin; `None` if either side has no position.
    pub distance: Option<f64>,
}

/// Ranks rows by distance from an origin room.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceRanker {
    floor_scale: f64,
    unpositioned: Unpositioned,
}

impl Default for DistanceRanker {
    fn default() -> Self {
        Self {
            floor_scale: DEFAULT_FLOOR_SCALE,
            unpositioned: Unpositioned::Last,
        }
    }
}

impl DistanceRanker {
    /// Creates a ranker with the default floor scale.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the floor weight.
    #[must_use]
    pub fn with_floor_scale(mut self, floor_scale: f64) -> Self {
        self.floor_scale = floor_scale;
        self
    }

    /// Sets the handling of rows without a distance.
    #[must_use]
    pub fn with_unpositioned(mut self, unpositioned: Unpositioned) -> Self {
        self.unpositioned = unpositioned;
        self
    }

    /// Weighted Euclidean distance between two positions.
    pub fn distance(&self, a: &Position, b: &Position) -> f64 {
        let dx = a.x - b.x;
        let dy = a.y - b.y;
        let dz = (a.z - b.z) * self.floor_scale;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Annotates and sorts rows by ascending distance from `origin`.
    ///
    /// The sort is stable, so rows at equal distance keep their input order.
    /// When the origin itself has no position every distance is `None` and
    /// no row is dropped.
    pub fn rank(&self, origin: &Room, rows: Vec<AvailabilityRow>) -> Vec<RankedRow> {
        let keep_unpositioned =
            origin.position.is_none() || self.unpositioned == Unpositioned::Last;

        let mut ranked: Vec<RankedRow> = rows
            .into_iter()
            .map(|row| {
                let distance = match (&origin.position, &row.room.position) {
                    (Some(from), Some(to)) => Some(self.distance(from, to)),
                    _ => None,
                };
                RankedRow { row, distance }
            })
            .filter(|r| r.distance.is_some() || keep_unpositioned)
            .collect();

        ranked.sort_by(|a, b| match (a.distance, b.distance) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        ranked
    }
}

/// Ranks rows with the default ranker.
pub fn rank_by_distance(origin: &Room, rows: Vec<AvailabilityRow>) -> Vec<RankedRow> {
    DistanceRanker::default().rank(origin, rows)
}

/// Wraps rows without computing distances, keeping their order.
pub fn unranked(rows: Vec<AvailabilityRow>) -> Vec<RankedRow> {
    rows.into_iter()
        .map(|row| RankedRow {
            row,
            distance: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::AvailabilityStatus;
    use crate::room::RoomNumber;

    fn room(number: &str, position: Option<Position>) -> Room {
        let room = Room::new(RoomNumber::parse(number).unwrap());
        match position {
            Some(p) => room.with_position(p),
            None => room,
        }
    }

    fn row(number: &str, position: Option<Position>) -> AvailabilityRow {
        AvailabilityRow {
            room: room(number, position),
            status: AvailabilityStatus::NoFurtherEvents,
        }
    }

    fn numbers(ranked: &[RankedRow]) -> Vec<&str> {
        ranked.iter().map(|r| r.row.number().as_str()).collect()
    }

    fn origin() -> Room {
        room("01-001", Some(Position::new(0.0, 0.0, 0.0)))
    }

    #[test]
    fn same_floor_beats_floor_change() {
        let rows = vec![
            row("01-201", Some(Position::new(0.0, 0.0, 2.0))),
            row("01-010", Some(Position::new(3.0, 4.0, 0.0))),
        ];
        let ranked = rank_by_distance(&origin(), rows);

        assert_eq!(numbers(&ranked), vec!["01-010", "01-201"]);
        assert_eq!(ranked[0].distance, Some(5.0));
        assert_eq!(ranked[1].distance, Some(10.0));
    }

    #[test]
    fn floor_scale_is_configurable() {
        let ranker = DistanceRanker::new().with_floor_scale(1.0);
        let ranked = ranker.rank(
            &origin(),
            vec![
                row("01-010", Some(Position::new(3.0, 4.0, 0.0))),
                row("01-201", Some(Position::new(0.0, 0.0, 2.0))),
            ],
        );
        assert_eq!(numbers(&ranked), vec!["01-201", "01-010"]);
    }

    #[test]
    fn unpositioned_rows_sort_last_in_input_order() {
        let rows = vec![
            row("01-100", None),
            row("01-010", Some(Position::new(3.0, 4.0, 0.0))),
            row("01-101", None),
        ];
        let ranked = rank_by_distance(&origin(), rows);
        assert_eq!(numbers(&ranked), vec!["01-010", "01-100", "01-101"]);
        assert_eq!(ranked[1].distance, None);
    }

    #[test]
    fn unpositioned_rows_can_be_excluded() {
        let ranker = DistanceRanker::new().with_unpositioned(Unpositioned::Exclude);
        let ranked = ranker.rank(
            &origin(),
            vec![
                row("01-100", None),
                row("01-010", Some(Position::new(3.0, 4.0, 0.0))),
            ],
        );
        assert_eq!(numbers(&ranked), vec!["01-010"]);
    }

    #[test]
    fn equal_distances_keep_input_order() {
        let rows = vec![
            row("01-020", Some(Position::new(0.0, 5.0, 0.0))),
            row("01-010", Some(Position::new(5.0, 0.0, 0.0))),
        ];
        let ranked = rank_by_distance(&origin(), rows);
        assert_eq!(numbers(&ranked), vec!["01-020", "01-010"]);
    }

    #[test]
    fn origin_without_position_yields_no_distances() {
        let rows = vec![
            row("01-020", Some(Position::new(0.0, 5.0, 0.0))),
            row("01-010", Some(Position::new(5.0, 0.0, 0.0))),
        ];
        let ranked = rank_by_distance(&room("01-001", None), rows);
        assert_eq!(numbers(&ranked), vec!["01-020", "01-010"]);
        assert!(ranked.iter().all(|r| r.distance.is_none()));
    }

    #[test]
    fn unranked_keeps_order() {
        let ranked = unranked(vec![row("01-020", None), row("01-010", None)]);
        assert_eq!(numbers(&ranked), vec!["01-020", "01-010"]);
    }
}
