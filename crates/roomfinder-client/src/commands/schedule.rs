//! The day plan of one room.

use chrono::NaiveDateTime;
use roomfinder_core::OutputFormatter;
use roomfinder_providers::RoomSchedule;

use crate::config::ClientConfig;
use crate::error::ClientResult;

use super::{build_service, parse_room, print_json};

/// Prints the rest of the day for `room`, as seen at `now`.
pub async fn run(config: &ClientConfig, room: &str, json: bool, now: NaiveDateTime) -> ClientResult<()> {
    let number = parse_room(room)?;
    let service = build_service(config)?;
    let schedule = service.room_schedule(&number, now).await?;

    if json {
        return print_json(&schedule);
    }

    let formatter = OutputFormatter::new(config.display.format_options(config.map.link(), None));
    for line in render(&formatter, &schedule, now) {
        println!("{}", line);
    }
    Ok(())
}

fn render(formatter: &OutputFormatter, schedule: &RoomSchedule, now: NaiveDateTime) -> Vec<String> {
    let mut lines = vec![format!("{} on {}", schedule.room.number, now.format("%Y-%m-%d"))];
    if schedule.slots.is_empty() {
        lines.push("Nothing left today.".to_string());
    } else {
        lines.extend(formatter.format_schedule(&schedule.slots));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use roomfinder_core::{Room, RoomNumber, ScheduleSlot, SlotKind};

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 4)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn room() -> Room {
        Room::new(RoomNumber::parse("09-010").unwrap())
    }

    #[test]
    fn header_then_slots() {
        let schedule = RoomSchedule {
            room: room(),
            slots: vec![
                ScheduleSlot {
                    start: at(10, 0),
                    end: at(12, 0),
                    kind: SlotKind::Free,
                },
                ScheduleSlot {
                    start: at(12, 0),
                    end: at(14, 0),
                    kind: SlotKind::Event {
                        subject: "Microeconomics".to_string(),
                    },
                },
            ],
        };
        let lines = render(&OutputFormatter::with_defaults(), &schedule, at(10, 0));

        assert_eq!(
            lines,
            vec![
                "09-010 on 2025-03-04",
                "10:00-12:00  free",
                "12:00-14:00  Microeconomics"
            ]
        );
    }

    #[test]
    fn empty_plan() {
        let schedule = RoomSchedule {
            room: room(),
            slots: Vec::new(),
        };
        let lines = render(&OutputFormatter::with_defaults(), &schedule, at(22, 30));
        assert_eq!(lines, vec!["09-010 on 2025-03-04", "Nothing left today."]);
    }
}
