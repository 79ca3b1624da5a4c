//! Golden tests for output formatting.
//!
//! These tests use insta inline snapshots to keep the output format stable.
//! Run with `cargo insta review` to update snapshots after intentional changes.

use chrono::{NaiveDate, NaiveDateTime};

use crate::availability::{AvailabilityRow, AvailabilityStatus};
use crate::distance::{RankedRow, unranked};
use crate::event::ScheduledEvent;
use crate::format::{FormatOptions, OutputFormatter, TimeFormat};
use crate::room::{Room, RoomNumber};
use crate::schedule::day_plan;

fn at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 4)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

fn room(number: &str) -> Room {
    Room::new(RoomNumber::parse(number).unwrap())
}

/// Free seminar room, an underground room with no data and a busy auditorium.
fn sample_rows() -> Vec<AvailabilityRow> {
    vec![
        AvailabilityRow {
            room: room("09-010")
                .with_capacity(45)
                .with_floor("0")
                .with_map_id(1001),
            status: AvailabilityStatus::FreeUntil {
                until: at(14, 15),
                next_end: at(16, 0),
                subject: "Accounting I".to_string(),
            },
        },
        AvailabilityRow {
            room: room("01-U102"),
            status: AvailabilityStatus::NoFurtherEvents,
        },
        AvailabilityRow {
            room: room("10-101").with_capacity(120).with_floor("1"),
            status: AvailabilityStatus::BusyUntil {
                until: at(11, 0),
                subject: "Corporate Finance".to_string(),
            },
        },
    ]
}

fn ranked_rows() -> Vec<RankedRow> {
    let distances = [Some(5.0), Some(12.0), None];
    sample_rows()
        .into_iter()
        .zip(distances)
        .map(|(row, distance)| RankedRow { row, distance })
        .collect()
}

// =============================================================================
// TTY Output Golden Tests
// =============================================================================

#[test]
fn golden_tty_empty() {
    let output = OutputFormatter::with_defaults().format_tty(&[]);
    assert!(output.is_empty());
}

#[test]
fn golden_tty_unranked() {
    let output = OutputFormatter::with_defaults().format_tty(&unranked(sample_rows()));

    insta::assert_snapshot!(output.join("\n"), @r"
    09-010  45 seats  floor 0  free until 14:15 (Accounting I)
    01-U102  free for the rest of the day
    10-101  120 seats  floor 1  busy until 11:00 (Corporate Finance)
    ");
}

#[test]
fn golden_tty_ranked() {
    let output = OutputFormatter::with_defaults().format_tty(&ranked_rows());

    insta::assert_snapshot!(output.join("\n"), @r"
    09-010  45 seats  floor 0  free until 14:15 (Accounting I)  5.0 away
    01-U102  free for the rest of the day  12.0 away
    10-101  120 seats  floor 1  busy until 11:00 (Corporate Finance)
    ");
}

#[test]
fn golden_tty_time_format_12h() {
    let formatter = OutputFormatter::new(FormatOptions {
        time_format: TimeFormat::H12,
        ..Default::default()
    });
    let output = formatter.format_tty(&unranked(sample_rows()));

    insta::assert_snapshot!(&output[0], @"09-010  45 seats  floor 0  free until 02:15 PM (Accounting I)");
}

#[test]
fn golden_tty_custom_separator() {
    let formatter = OutputFormatter::new(FormatOptions {
        hour_separator: "h".to_string(),
        ..Default::default()
    });
    let output = formatter.format_tty(&unranked(sample_rows()));

    insta::assert_snapshot!(&output[2], @"10-101  120 seats  floor 1  busy until 11h00 (Corporate Finance)");
}

#[test]
fn golden_tty_subject_truncation() {
    let formatter = OutputFormatter::new(FormatOptions {
        max_subject_length: Some(10),
        ..Default::default()
    });
    let output = formatter.format_tty(&unranked(sample_rows()));

    insta::assert_snapshot!(&output[2], @"10-101  120 seats  floor 1  busy until 11:00 (Corpora...)");
}

#[test]
fn golden_tty_limit() {
    let formatter = OutputFormatter::new(FormatOptions {
        limit: Some(1),
        ..Default::default()
    });
    let output = formatter.format_tty(&ranked_rows());

    assert_eq!(output.len(), 1);
    assert!(output[0].starts_with("09-010"));
}

#[test]
fn golden_tty_route_hyperlink() {
    let formatter = OutputFormatter::new(FormatOptions {
        hyperlinks: true,
        origin_map_id: Some(7),
        ..Default::default()
    });
    let output = formatter.format_tty(&unranked(sample_rows()));

    assert!(output[0].starts_with("\x1b]8;;http://use.mazemap.com/embed.html?"));
    assert!(output[0].contains("dest=1001&starttype=poi&start=7"));
    // No map location, no link.
    assert!(output[1].starts_with("01-U102"));
}

// =============================================================================
// JSON Output Golden Tests
// =============================================================================

#[test]
fn golden_json_empty() {
    let output = OutputFormatter::with_defaults().format_json(&[]);

    insta::assert_json_snapshot!(output, @r#"
    {
      "rooms": [],
      "count": 0
    }
    "#);
}

#[test]
fn golden_json_unranked() {
    let output = OutputFormatter::with_defaults().format_json(&unranked(sample_rows()));

    insta::assert_json_snapshot!(output, @r#"
    {
      "rooms": [
        {
          "number": "09-010",
          "capacity": 45,
          "floor": "0",
          "free": true,
          "status": "free_until",
          "until": "2025-03-04T14:15:00",
          "subject": "Accounting I"
        },
        {
          "number": "01-U102",
          "free": true,
          "status": "no_further_events"
        },
        {
          "number": "10-101",
          "capacity": 120,
          "floor": "1",
          "free": false,
          "status": "busy_until",
          "until": "2025-03-04T11:00:00",
          "subject": "Corporate Finance"
        }
      ],
      "count": 3
    }
    "#);
}

#[test]
fn golden_json_ranked_with_route() {
    let formatter = OutputFormatter::new(FormatOptions {
        origin_map_id: Some(7),
        ..Default::default()
    });
    let output = formatter.format_json(&ranked_rows());
    let value = serde_json::to_value(&output).unwrap();

    assert_eq!(value["count"], 3);
    assert_eq!(value["rooms"][0]["distance"], 5.0);
    assert_eq!(
        value["rooms"][0]["route_url"],
        "http://use.mazemap.com/embed.html?campusid=710&typepois=36317&desttype=poi&dest=1001&starttype=poi&start=7"
    );
    assert!(value["rooms"][1].get("route_url").is_none());
    assert!(value["rooms"][2].get("distance").is_none());
}

// =============================================================================
// Day Plan Golden Tests
// =============================================================================

#[test]
fn golden_schedule() {
    let number = RoomNumber::parse("09-010").unwrap();
    let events = vec![
        ScheduledEvent::new(number.clone(), at(8, 15), at(10, 0), "Microeconomics").unwrap(),
        ScheduledEvent::new(number.clone(), at(12, 15), at(14, 0), "Business Law").unwrap(),
    ];
    let slots = day_plan(&number, &events, at(9, 0), at(9, 0).date());
    let output = OutputFormatter::with_defaults().format_schedule(&slots);

    insta::assert_snapshot!(output.join("\n"), @r"
    08:15-10:00  Microeconomics
    10:00-12:15  free
    12:15-14:00  Business Law
    14:00-22:00  free
    ");
}
