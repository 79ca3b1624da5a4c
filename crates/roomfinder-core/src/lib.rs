//! Core types: rooms, events, time windows, availability resolution, ranking, formatting

pub mod availability;
pub mod distance;
pub mod event;
pub mod format;
pub mod issue;
pub mod maplink;
pub mod query;
pub mod room;
pub mod schedule;
pub mod time;
pub mod tracing;

pub use availability::{
    AvailabilityRow, AvailabilityStatus, Probe, Resolution, apply_size_filter, free_rows, resolve,
    resolve_with_issues,
};
pub use distance::{DEFAULT_FLOOR_SCALE, DistanceRanker, RankedRow, Unpositioned, rank_by_distance, unranked};
pub use event::ScheduledEvent;
pub use format::{
    FormatOptions, JsonOutput, JsonRoom, OutputFormatter, TimeFormat, ellipsis,
    make_hyperlink,
};
pub use issue::{DataIssue, RecordKind};
pub use maplink::MapLink;
pub use query::{AvailabilityQuery, QueryError, SizeFilter};
pub use room::{Position, Room, RoomNumber, RoomNumberError};
pub use schedule::{ScheduleSlot, SlotKind, day_plan};
pub use time::{STUDY_DAY_END, STUDY_DAY_START, TimeWindow};
pub use tracing::{LogFormat, TracingConfig, TracingError, init_tracing};
