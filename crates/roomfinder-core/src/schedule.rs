//! Per-room day plan.
//!
//! Lays out the remaining events of one room on a given day together with
//! the free gaps between them, clipped to the study day.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::event::ScheduledEvent;
use crate::room::RoomNumber;
use crate::time::{STUDY_DAY_END, STUDY_DAY_START};

/// What occupies a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlotKind {
    /// Nothing scheduled.
    Free,
    /// A scheduled event.
    Event { subject: String },
}

/// One entry of a day plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(flatten)]
    pub kind: SlotKind,
}

impl ScheduleSlot {
    fn free(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start,
            end,
            kind: SlotKind::Free,
        }
    }

    /// Returns true for free slots.
    pub fn is_free(&self) -> bool {
        self.kind == SlotKind::Free
    }
}

/// Builds the plan of `room` for `day` as seen at `now`.
///
/// Events that ended by `now` are skipped; the rest are listed by start
/// time. Free slots fill the gaps between `max(day 07:00, now)` and
/// 22:00, so overlapping events never produce a negative gap. Events are
/// listed in full even when they run past the end of the study day.
pub fn day_plan(
    room: &RoomNumber,
    events: &[ScheduledEvent],
    now: NaiveDateTime,
    day: NaiveDate,
) -> Vec<ScheduleSlot> {
    let day_start = day.and_time(STUDY_DAY_START);
    let day_end = day.and_time(STUDY_DAY_END);

    let mut remaining: Vec<&ScheduledEvent> = events
        .iter()
        .filter(|e| &e.room == room && e.end > now && e.date() == day)
        .collect();
    remaining.sort_by_key(|e| e.start);

    let mut slots = Vec::with_capacity(remaining.len() * 2 + 1);
    let mut cursor = day_start.max(now);

    for event in remaining {
        let gap_end = event.start.min(day_end);
        if gap_end > cursor {
            slots.push(ScheduleSlot::free(cursor, gap_end));
        }
        slots.push(ScheduleSlot {
            start: event.start,
            end: event.end,
            kind: SlotKind::Event {
                subject: event.subject.clone(),
            },
        });
        cursor = cursor.max(event.end);
    }

    if day_end > cursor {
        slots.push(ScheduleSlot::free(cursor, day_end));
    }

    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 4).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        day().and_hms_opt(h, m, 0).unwrap()
    }

    fn number(s: &str) -> RoomNumber {
        RoomNumber::parse(s).unwrap()
    }

    fn event(room: &str, start: NaiveDateTime, end: NaiveDateTime, subject: &str) -> ScheduledEvent {
        ScheduledEvent::new(number(room), start, end, subject).unwrap()
    }

    fn spans(slots: &[ScheduleSlot]) -> Vec<(String, String, bool)> {
        slots
            .iter()
            .map(|s| {
                (
                    s.start.format("%H:%M").to_string(),
                    s.end.format("%H:%M").to_string(),
                    s.is_free(),
                )
            })
            .collect()
    }

    fn span(start: &str, end: &str, free: bool) -> (String, String, bool) {
        (start.to_string(), end.to_string(), free)
    }

    #[test]
    fn empty_room_is_free_all_day() {
        let slots = day_plan(&number("09-010"), &[], at(6, 0), day());
        assert_eq!(spans(&slots), vec![span("07:00", "22:00", true)]);
    }

    #[test]
    fn gaps_between_events() {
        let events = vec![
            event("09-010", at(13, 0), at(15, 0), "Afternoon"),
            event("09-010", at(8, 0), at(10, 0), "Morning"),
            event("10-101", at(10, 0), at(12, 0), "Other room"),
        ];
        let slots = day_plan(&number("09-010"), &events, at(7, 0), day());
        assert_eq!(
            spans(&slots),
            vec![
                span("07:00", "08:00", true),
                span("08:00", "10:00", false),
                span("10:00", "13:00", true),
                span("13:00", "15:00", false),
                span("15:00", "22:00", true),
            ]
        );
        assert_eq!(
            slots[1].kind,
            SlotKind::Event {
                subject: "Morning".to_string()
            }
        );
    }

    #[test]
    fn finished_events_are_skipped_and_plan_starts_now() {
        let events = vec![
            event("09-010", at(8, 0), at(10, 0), "Over"),
            event("09-010", at(12, 0), at(13, 0), "Lunch talk"),
        ];
        let slots = day_plan(&number("09-010"), &events, at(10, 30), day());
        assert_eq!(
            spans(&slots),
            vec![
                span("10:30", "12:00", true),
                span("12:00", "13:00", false),
                span("13:00", "22:00", true),
            ]
        );
    }

    #[test]
    fn ongoing_event_is_listed_without_leading_gap() {
        let events = vec![event("09-010", at(10, 0), at(12, 0), "Running")];
        let slots = day_plan(&number("09-010"), &events, at(11, 0), day());
        assert_eq!(
            spans(&slots),
            vec![span("10:00", "12:00", false), span("12:00", "22:00", true)]
        );
    }

    #[test]
    fn overlapping_events_do_not_produce_negative_gaps() {
        let events = vec![
            event("09-010", at(9, 0), at(12, 0), "Long"),
            event("09-010", at(10, 0), at(11, 0), "Nested"),
            event("09-010", at(11, 30), at(13, 0), "Overlapping"),
        ];
        let slots = day_plan(&number("09-010"), &events, at(7, 0), day());
        assert_eq!(
            spans(&slots),
            vec![
                span("07:00", "09:00", true),
                span("09:00", "12:00", false),
                span("10:00", "11:00", false),
                span("11:30", "13:00", false),
                span("13:00", "22:00", true),
            ]
        );
    }

    #[test]
    fn no_trailing_slot_after_study_day() {
        let events = vec![event("09-010", at(20, 0), at(22, 30), "Evening course")];
        let slots = day_plan(&number("09-010"), &events, at(19, 0), day());
        assert_eq!(
            spans(&slots),
            vec![span("19:00", "20:00", true), span("20:00", "22:30", false)]
        );
    }

    #[test]
    fn late_query_yields_nothing_free() {
        let slots = day_plan(&number("09-010"), &[], at(23, 0), day());
        assert!(slots.is_empty());
    }
}
