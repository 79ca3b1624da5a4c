//! Output formatting for free-room listings.
//!
//! This module provides formatters for displaying resolved rooms:
//! - **TTY**: Human-readable terminal output with optional hyperlinks
//! - **JSON**: Machine-readable JSON output
//!
//! Day plans of a single room are rendered with [`OutputFormatter::format_schedule`].

use std::borrow::Cow;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::availability::AvailabilityStatus;
use crate::distance::RankedRow;
use crate::maplink::MapLink;
use crate::schedule::{ScheduleSlot, SlotKind};

/// Time format preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFormat {
    /// 24-hour format (e.g., "14:30").
    #[default]
    H24,
    /// 12-hour format with AM/PM (e.g., "02:30 PM").
    H12,
}

/// Configuration options for output formatting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatOptions {
    /// Maximum length for event subjects (truncated with ellipsis).
    pub max_subject_length: Option<usize>,
    /// Whether to include hyperlinks (OSC8) in TTY output.
    pub hyperlinks: bool,
    /// Hour separator character (e.g., ":", "h").
    pub hour_separator: String,
    /// Time format preference.
    pub time_format: TimeFormat,
    /// Maximum number of rooms to print.
    pub limit: Option<usize>,
    /// Map location of the origin room, used for route links.
    pub origin_map_id: Option<u64>,
    /// Directions link builder.
    pub map: MapLink,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            max_subject_length: None,
            hyperlinks: false,
            hour_separator: ":".to_string(),
            time_format: TimeFormat::H24,
            limit: None,
            origin_map_id: None,
            map: MapLink::default(),
        }
    }
}

/// JSON output format for machine consumption.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    /// Formatted rooms, in display order.
    pub rooms: Vec<JsonRoom>,
    /// Number of rooms returned.
    pub count: usize,
}

/// A single room in JSON format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRoom {
    pub number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<String>,
    /// Whether the room is free for the query.
    pub free: bool,
    /// `free_until`, `busy_until` or `no_further_events`.
    pub status: String,
    /// When the current state ends, as `YYYY-MM-DDTHH:MM:SS`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_url: Option<String>,
}

/// Output formatter for room listings.
#[derive(Debug, Clone)]
pub struct OutputFormatter {
    options: FormatOptions,
}

impl OutputFormatter {
    /// Creates a new OutputFormatter with the given options.
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    /// Creates a new OutputFormatter with default options.
    pub fn with_defaults() -> Self {
        Self::new(FormatOptions::default())
    }

    /// Formats rooms for TTY output, one line per room.
    pub fn format_tty(&self, rows: &[RankedRow]) -> Vec<String> {
        self.limited(rows).iter().map(|r| self.format_line(r)).collect()
    }

    /// Formats rooms as JSON output.
    pub fn format_json(&self, rows: &[RankedRow]) -> JsonOutput {
        let rooms: Vec<JsonRoom> = self
            .limited(rows)
            .iter()
            .map(|r| self.to_json_room(r))
            .collect();

        JsonOutput {
            count: rooms.len(),
            rooms,
        }
    }

    /// Formats a room day plan, one line per slot.
    pub fn format_schedule(&self, slots: &[ScheduleSlot]) -> Vec<String> {
        slots
            .iter()
            .map(|slot| {
                let span = format!(
                    "{}-{}",
                    self.format_clock(slot.start),
                    self.format_clock(slot.end)
                );
                match &slot.kind {
                    SlotKind::Free => format!("{span}  free"),
                    SlotKind::Event { subject } => {
                        format!("{span}  {}", self.truncate_subject(subject))
                    }
                }
            })
            .collect()
    }

    fn limited<'a>(&self, rows: &'a [RankedRow]) -> &'a [RankedRow] {
        match self.options.limit {
            Some(limit) if limit < rows.len() => &rows[..limit],
            _ => rows,
        }
    }

    fn format_line(&self, ranked: &RankedRow) -> String {
        let room = &ranked.row.room;

        let number = match self.route_url(ranked) {
            Some(url) if self.options.hyperlinks => make_hyperlink(&url, room.number.as_str()),
            _ => room.number.to_string(),
        };

        let mut parts = vec![number];
        if let Some(capacity) = room.capacity {
            parts.push(format!("{capacity} seats"));
        }
        if let Some(ref floor) = room.floor {
            parts.push(format!("floor {floor}"));
        }
        parts.push(self.format_status(&ranked.row.status));
        if let Some(distance) = ranked.distance {
            parts.push(format!("{distance:.1} away"));
        }

        parts.join("  ")
    }

    fn format_status(&self, status: &AvailabilityStatus) -> String {
        match status {
            AvailabilityStatus::FreeUntil { until, subject, .. } => format!(
                "free until {} ({})",
                self.format_clock(*until),
                self.truncate_subject(subject)
            ),
            AvailabilityStatus::NoFurtherEvents => "free for the rest of the day".to_string(),
            AvailabilityStatus::BusyUntil { until, subject } => format!(
                "busy until {} ({})",
                self.format_clock(*until),
                self.truncate_subject(subject)
            ),
        }
    }

    /// Formats a time of day using the configured format and separator.
    fn format_clock(&self, dt: NaiveDateTime) -> String {
        let sep = &self.options.hour_separator;
        match self.options.time_format {
            TimeFormat::H24 => dt.format(&format!("%H{}%M", sep)).to_string(),
            TimeFormat::H12 => dt.format(&format!("%I{}%M %p", sep)).to_string(),
        }
    }

    fn truncate_subject<'a>(&self, subject: &'a str) -> Cow<'a, str> {
        match self.options.max_subject_length {
            Some(max_len) => ellipsis(subject, max_len),
            None => Cow::Borrowed(subject),
        }
    }

    fn route_url(&self, ranked: &RankedRow) -> Option<String> {
        let from = self.options.origin_map_id?;
        let to = ranked.row.room.map_id?;
        self.options
            .map
            .directions(from, to)
            .map(|url| url.to_string())
    }

    fn to_json_room(&self, ranked: &RankedRow) -> JsonRoom {
        let room = &ranked.row.room;
        let status = &ranked.row.status;

        let (status_name, until, subject) = match status {
            AvailabilityStatus::FreeUntil { until, subject, .. } => {
                ("free_until", Some(*until), Some(subject))
            }
            AvailabilityStatus::BusyUntil { until, subject } => {
                ("busy_until", Some(*until), Some(subject))
            }
            AvailabilityStatus::NoFurtherEvents => ("no_further_events", None, None),
        };

        JsonRoom {
            number: room.number.to_string(),
            capacity: room.capacity,
            floor: room.floor.clone(),
            free: status.is_free(),
            status: status_name.to_string(),
            until: until.map(|t| t.format("%Y-%m-%dT%H:%M:%S").to_string()),
            subject: subject.map(|s| self.truncate_subject(s).into_owned()),
            distance: ranked.distance,
            route_url: self.route_url(ranked),
        }
    }
}

/// Truncates a string with ellipsis if it exceeds the given length.
pub fn ellipsis(s: &str, max_len: usize) -> Cow<'_, str> {
    if max_len == 0 {
        return Cow::Borrowed("");
    }

    if s.chars().count() <= max_len {
        return Cow::Borrowed(s);
    }

    let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
    Cow::Owned(format!("{}...", truncated))
}

/// Creates an OSC8 hyperlink for terminal output.
pub fn make_hyperlink(url: &str, label: &str) -> String {
    // OSC8 hyperlink format: \e]8;;URL\e\\LABEL\e]8;;\e\\
    format!("\x1b]8;;{}\x1b\\{}\x1b]8;;\x1b\\", url, label)
}

#[cfg(test)]
mod tests {
    use super::*;

    mod ellipsis_tests {
        use super::*;

        #[test]
        fn short_string_unchanged() {
            assert_eq!(ellipsis("hello", 10), "hello");
        }

        #[test]
        fn exact_length_unchanged() {
            assert_eq!(ellipsis("hello", 5), "hello");
        }

        #[test]
        fn long_string_truncated() {
            assert_eq!(ellipsis("hello world", 8), "hello...");
        }

        #[test]
        fn zero_length() {
            assert_eq!(ellipsis("hello", 0), "");
        }

        #[test]
        fn counts_characters_not_bytes() {
            assert_eq!(ellipsis("Übungsraum", 10), "Übungsraum");
            assert_eq!(ellipsis("Übungsraum Ökonomie", 8), "Übung...");
        }
    }

    #[test]
    fn hyperlink_wraps_label() {
        let link = make_hyperlink("http://example.com", "09-010");
        assert!(link.starts_with("\x1b]8;;http://example.com\x1b\\09-010"));
        assert!(link.ends_with("\x1b]8;;\x1b\\"));
    }
}

#[cfg(test)]
mod golden_tests;
