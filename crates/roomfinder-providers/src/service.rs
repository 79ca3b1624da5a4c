//! The free-room service.
//!
//! [`FreeRoomService`] ties the pieces together for one request: fetch the
//! directory and the day's events concurrently (each under a timeout),
//! normalize both, resolve every room against the query and optionally rank
//! the free rooms by distance from an origin room.
//!
//! The service holds no state between calls; every operation fetches fresh
//! data.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Days, NaiveDate, NaiveDateTime};
use roomfinder_core::{
    AvailabilityQuery, AvailabilityRow, DataIssue, DistanceRanker, Probe, RankedRow, Room,
    RoomNumber, ScheduleSlot, ScheduledEvent, TimeWindow, apply_size_filter, day_plan, free_rows,
    resolve_with_issues, unranked,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{ProviderError, ProviderResult, ResolveError};
use crate::normalize::{Normalized, normalize_event_feed, normalize_room_feed};
use crate::provider::{EventFeed, RoomDirectory};

/// Default time allowed for each upstream fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Every room of the catalog resolved against one query.
#[derive(Debug, Clone)]
pub struct ResolvedRooms {
    pub probe: Probe,
    /// One row per catalog room, in catalog order.
    pub rows: Vec<AvailabilityRow>,
    /// The normalized catalog the rows were built from.
    pub catalog: Vec<Room>,
    /// Records dropped on the way, from both feeds and the resolver.
    pub issues: Vec<DataIssue>,
}

/// The answer to a free-room query.
#[derive(Debug, Clone)]
pub struct FreeRoomReport {
    pub probe: Probe,
    /// Free rooms passing the size filter, nearest first when ranked.
    pub rows: Vec<RankedRow>,
    /// The origin room, when the query asked for ranking.
    pub origin: Option<Room>,
    /// Number of catalog rooms before filtering.
    pub catalog_size: usize,
    pub issues: Vec<DataIssue>,
}

/// One room's day plan.
#[derive(Debug, Clone, Serialize)]
pub struct RoomSchedule {
    pub room: Room,
    pub slots: Vec<ScheduleSlot>,
}

/// Orchestrates fetching, normalization and resolution.
#[derive(Clone)]
pub struct FreeRoomService {
    directory: Arc<dyn RoomDirectory>,
    events: Arc<dyn EventFeed>,
    fetch_timeout: Duration,
    ranker: DistanceRanker,
}

impl FreeRoomService {
    /// Creates a service over the given sources.
    pub fn new(directory: Arc<dyn RoomDirectory>, events: Arc<dyn EventFeed>) -> Self {
        Self {
            directory,
            events,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            ranker: DistanceRanker::default(),
        }
    }

    /// Sets the time allowed for each upstream fetch.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Sets the ranker used for origin queries.
    pub fn with_ranker(mut self, ranker: DistanceRanker) -> Self {
        self.ranker = ranker;
        self
    }

    /// Fetches and normalizes the room catalog.
    pub async fn room_catalog(&self) -> Result<Normalized<Room>, ResolveError> {
        self.fetch_catalog().await
    }

    /// Fetches and normalizes the events of `date`.
    pub async fn day_events(&self, date: NaiveDate) -> Result<Normalized<ScheduledEvent>, ResolveError> {
        self.fetch_events(TimeWindow::for_date(date)).await
    }

    /// Resolves every catalog room against `query`.
    ///
    /// `today` stands in for a missing query date.
    ///
    /// # Errors
    ///
    /// Fails with [`ResolveError::InvalidQuery`] before fetching anything if
    /// the query window is empty, and with the matching `*Unavailable`
    /// variant if either feed cannot be fetched in time.
    pub async fn resolve_free_rooms(
        &self,
        query: &AvailabilityQuery,
        today: NaiveDate,
    ) -> Result<ResolvedRooms, ResolveError> {
        let probe = query.probe(today)?;
        let day = query.day(today);

        let (catalog, events) =
            tokio::join!(self.fetch_catalog(), self.fetch_events(TimeWindow::for_date(day)));
        let catalog = catalog?;
        let events = events?;

        let resolution = resolve_with_issues(&catalog.items, &events.items, &probe);

        let mut issues = catalog.issues;
        issues.extend(events.issues);
        issues.extend(resolution.issues);

        let free = resolution.rows.iter().filter(|r| r.is_free()).count();
        info!(
            rooms = resolution.rows.len(),
            free,
            issues = issues.len(),
            "Resolved room availability"
        );

        Ok(ResolvedRooms {
            probe,
            rows: resolution.rows,
            catalog: catalog.items,
            issues,
        })
    }

    /// Answers a free-room query: free rooms only, size-filtered, ranked by
    /// distance when the query names an origin room.
    ///
    /// # Errors
    ///
    /// As [`Self::resolve_free_rooms`], plus
    /// [`ResolveError::UnknownOriginRoom`] when the origin is not in the
    /// catalog.
    pub async fn find_free_rooms(
        &self,
        query: &AvailabilityQuery,
        today: NaiveDate,
    ) -> Result<FreeRoomReport, ResolveError> {
        let resolved = self.resolve_free_rooms(query, today).await?;
        let catalog_size = resolved.catalog.len();

        let origin = match query.origin {
            Some(ref number) => Some(
                find_room(&resolved.catalog, number)
                    .cloned()
                    .ok_or_else(|| ResolveError::UnknownOriginRoom(number.to_string()))?,
            ),
            None => None,
        };

        let rows = apply_size_filter(free_rows(resolved.rows), query.size);
        let rows = match origin {
            Some(ref origin) => self.ranker.rank(origin, rows),
            None => unranked(rows),
        };

        debug!(
            free = rows.len(),
            ranked = origin.is_some(),
            "Free-room query answered"
        );

        Ok(FreeRoomReport {
            probe: resolved.probe,
            rows,
            origin,
            catalog_size,
            issues: resolved.issues,
        })
    }

    /// Builds the day plan of one room as seen at `now`.
    ///
    /// # Errors
    ///
    /// Fails with [`ResolveError::UnknownRoom`] if the room is not in the
    /// catalog.
    pub async fn room_schedule(
        &self,
        number: &RoomNumber,
        now: NaiveDateTime,
    ) -> Result<RoomSchedule, ResolveError> {
        let day = now.date();
        let (catalog, events) =
            tokio::join!(self.fetch_catalog(), self.fetch_events(TimeWindow::for_date(day)));
        let catalog = catalog?;
        let events = events?;

        let room = find_room(&catalog.items, number)
            .cloned()
            .ok_or_else(|| ResolveError::UnknownRoom(number.to_string()))?;
        let slots = day_plan(number, &events.items, now, day);

        Ok(RoomSchedule { room, slots })
    }

    async fn fetch_catalog(&self) -> Result<Normalized<Room>, ResolveError> {
        let name = self.directory.name().to_string();
        let feed = self
            .with_timeout(&name, self.directory.fetch_room_catalog())
            .await
            .map_err(|e| {
                warn!(
                    provider = %name,
                    error = %e,
                    retryable = e.is_retryable(),
                    "Room directory unavailable"
                );
                ResolveError::DirectoryUnavailable(e)
            })?;

        let catalog = normalize_room_feed(&feed);
        report_issues("room directory", &catalog.issues);
        Ok(catalog)
    }

    /// Fetches the events overlapping `window`.
    ///
    /// The request starts a day early: feeds select events by start date, and
    /// an overnight event from the previous evening still blocks its room.
    async fn fetch_events(
        &self,
        window: TimeWindow,
    ) -> Result<Normalized<ScheduledEvent>, ResolveError> {
        let request = TimeWindow {
            start: window
                .start
                .checked_sub_days(Days::new(1))
                .unwrap_or(window.start),
            end: window.end,
        };

        let name = self.events.name().to_string();
        let feed = self
            .with_timeout(&name, self.events.fetch_events(request))
            .await
            .map_err(|e| {
                warn!(
                    provider = %name,
                    error = %e,
                    retryable = e.is_retryable(),
                    "Event feed unavailable"
                );
                ResolveError::EventFeedUnavailable(e)
            })?;

        let events = normalize_event_feed(&feed, &window);
        report_issues("event feed", &events.issues);
        Ok(events)
    }

    async fn with_timeout<T>(
        &self,
        provider: &str,
        fetch: impl Future<Output = ProviderResult<T>>,
    ) -> ProviderResult<T> {
        match tokio::time::timeout(self.fetch_timeout, fetch).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::timeout(format!(
                "no answer within {}s",
                self.fetch_timeout.as_secs_f64()
            ))
            .with_provider(provider)),
        }
    }
}

fn find_room<'a>(catalog: &'a [Room], number: &RoomNumber) -> Option<&'a Room> {
    catalog.iter().find(|room| &room.number == number)
}

fn report_issues(source: &str, issues: &[DataIssue]) {
    if !issues.is_empty() {
        warn!(source, dropped = issues.len(), "Dropped unusable records");
    }
}
