//! Live seat occupancy of the study areas.
//!
//! The seat-finder page renders one bar graph per study location, each a
//! `<table class="seatfinder-bar-graph" summary="...">`. The summary reads
//! like `Free: 12 seats of 80, occupied: 68 seats`; after splitting on
//! spaces, token 1 is the free count and token 6 the occupied count.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// The study locations, in the order the seat-finder page lists them.
pub const STUDY_LOCATIONS: [&str; 7] = [
    "Library Ground Floor",
    "Library Upper Floor",
    "Main Building - Learning Zone 2nd floor",
    "Main Building - Learning Zone 3rd floor",
    "theCo",
    "theStage",
    "GYM area at Unisport",
];

/// Free seats reported per location when the live page is unavailable.
pub const FALLBACK_FREE: u32 = 50;

/// Occupied seats reported per location when the live page is unavailable.
pub const FALLBACK_OCCUPIED: u32 = 20;

static BAR_GRAPH_TABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<table\b[^>]*\bclass\s*=\s*"[^"]*\bseatfinder-bar-graph\b[^"]*"[^>]*>"#)
        .expect("Invalid bar graph table regex")
});

static SUMMARY_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bsummary\s*=\s*"([^"]*)""#).expect("Invalid summary attribute regex")
});

/// Seat counts of one study location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancyRow {
    pub location: String,
    /// Free seats; `None` when the page value was unreadable.
    pub free: Option<u32>,
    /// Occupied seats; `None` when the page value was unreadable.
    pub occupied: Option<u32>,
}

impl OccupancyRow {
    pub fn new(location: impl Into<String>, free: Option<u32>, occupied: Option<u32>) -> Self {
        Self {
            location: location.into(),
            free,
            occupied,
        }
    }

    /// Total seats, known only when both counts are and their sum fits.
    pub fn total(&self) -> Option<u32> {
        self.free?.checked_add(self.occupied?)
    }
}

/// The rows reported when live data is unavailable.
pub fn fallback_rows() -> Vec<OccupancyRow> {
    STUDY_LOCATIONS
        .iter()
        .map(|location| OccupancyRow::new(*location, Some(FALLBACK_FREE), Some(FALLBACK_OCCUPIED)))
        .collect()
}

/// Parses the seat-finder page.
///
/// Tables are matched to [`STUDY_LOCATIONS`] by position; extra tables are
/// ignored and missing ones yield no row. Returns an empty list when the
/// page holds no bar graph at all.
pub fn parse_seatfinder_page(html: &str) -> Vec<OccupancyRow> {
    BAR_GRAPH_TABLE
        .find_iter(html)
        .zip(STUDY_LOCATIONS)
        .map(|(table, location)| {
            let summary = SUMMARY_ATTR
                .captures(table.as_str())
                .and_then(|c| c.get(1))
                .map_or("", |m| m.as_str());
            let (free, occupied) = parse_summary(summary);
            OccupancyRow::new(location, free, occupied)
        })
        .collect()
}

fn parse_summary(summary: &str) -> (Option<u32>, Option<u32>) {
    let tokens: Vec<&str> = summary.split(' ').collect();
    let count = |i: usize| tokens.get(i).and_then(|t| t.trim().parse().ok());
    (count(1), count(6))
}
