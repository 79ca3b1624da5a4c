//! The free-room listing.

use chrono::{NaiveDate, NaiveDateTime};
use roomfinder_core::query::{parse_date, parse_end, parse_start};
use roomfinder_core::time::{default_window_end, truncate_to_minute};
use roomfinder_core::{AvailabilityQuery, OutputFormatter, Probe, SizeFilter};
use roomfinder_providers::FreeRoomReport;
use tracing::info;

use crate::cli::QueryArgs;
use crate::config::{ClientConfig, QuerySettings};
use crate::error::{ClientError, ClientResult};

use super::{build_service, parse_room, print_json};

/// Builds the query for `roomfinder free`.
///
/// Command-line options win over the `[query]` defaults.
pub fn build_query(
    args: &QueryArgs,
    settings: &QuerySettings,
    now: NaiveDateTime,
) -> ClientResult<AvailabilityQuery> {
    let date = parse_date(args.date.as_deref(), now.date())?;
    let start = parse_start(args.start.as_deref(), truncate_to_minute(now.time()));

    let query = match parse_end(args.end.as_deref()) {
        Some(end) => AvailabilityQuery::between(start, end),
        None => AvailabilityQuery::at(start),
    };

    let size = SizeFilter::from_max_seats(args.max_seats.or(settings.max_seats));
    let origin = match args.near {
        Some(ref near) => Some(parse_room(near)?),
        None => settings.origin().map_err(ClientError::Config)?,
    };

    let query = query.with_date(date).with_size(size);
    Ok(match origin {
        Some(origin) => query.with_origin(origin),
        None => query,
    })
}

/// Builds the query of a bare `roomfinder` run: from now until the
/// default window end.
///
/// Late in the evening that end falls on the next day; the query then
/// becomes a point query at `now`.
pub fn landing_query(settings: &QuerySettings, now: NaiveDateTime) -> ClientResult<AvailabilityQuery> {
    let mut query = build_query(&QueryArgs::default(), settings, now)?;
    let end = default_window_end(now);
    if end.date() == now.date() {
        query.end = Some(end.time());
    }
    Ok(query)
}

/// Runs the query and prints the result.
pub async fn run(
    config: &ClientConfig,
    query: AvailabilityQuery,
    json: bool,
    limit: Option<usize>,
    today: NaiveDate,
) -> ClientResult<()> {
    let service = build_service(config)?;
    let report = service.find_free_rooms(&query, today).await?;

    if !report.issues.is_empty() {
        info!(dropped = report.issues.len(), "Some upstream records were unusable");
    }

    let mut display = config.display.clone();
    if limit.is_some() {
        display.limit = limit;
    }
    let origin_map_id = report.origin.as_ref().and_then(|room| room.map_id);
    let formatter = OutputFormatter::new(display.format_options(config.map.link(), origin_map_id));

    if json {
        return print_json(&formatter.format_json(&report.rows));
    }

    for line in render(&formatter, &report) {
        println!("{}", line);
    }
    Ok(())
}

fn render(formatter: &OutputFormatter, report: &FreeRoomReport) -> Vec<String> {
    let mut lines = vec![headline(report)];
    if report.rows.is_empty() {
        lines.push("No free rooms.".to_string());
    } else {
        lines.extend(formatter.format_tty(&report.rows));
    }
    lines
}

fn headline(report: &FreeRoomReport) -> String {
    let when = match report.probe {
        Probe::Point(t) => format!("at {} on {}", t.format("%H:%M"), t.format("%Y-%m-%d")),
        Probe::Interval(window) => format!(
            "from {} to {} on {}",
            window.start.format("%H:%M"),
            window.end.format("%H:%M"),
            window.start.format("%Y-%m-%d")
        ),
    };
    let near = report
        .origin
        .as_ref()
        .map(|room| format!(", nearest to {}", room.number))
        .unwrap_or_default();

    format!(
        "{} of {} rooms free {}{}",
        report.rows.len(),
        report.catalog_size,
        when,
        near
    )
}
