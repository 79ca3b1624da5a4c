//! [`RoomDirectory`] and [`EventFeed`] backed by the campus API.

use chrono::{Days, NaiveDate, NaiveTime};
use roomfinder_core::{RecordKind, TimeWindow};
use tracing::{debug, info};

use crate::error::ProviderResult;
use crate::provider::{BoxFuture, EventFeed, RoomDirectory};
use crate::raw::{DecodedFeed, RawEventRecord, RawRoomRecord, decode_records};

use super::client::CampusApiClient;
use super::config::CampusApiConfig;

const ROOMS_PATH: &str = "toolapi/Rooms";
const ROOMS_API_VERSION: &str = "1";
const EVENTS_API_VERSION: &str = "3";

const PROVIDER_NAME: &str = "campus-api";

/// Campus API provider for rooms and events.
pub struct CampusApiProvider {
    client: CampusApiClient,
}

impl CampusApiProvider {
    /// Creates a new provider with the given configuration.
    pub fn new(config: CampusApiConfig) -> ProviderResult<Self> {
        let client = CampusApiClient::new(config).map_err(|e| e.with_provider(PROVIDER_NAME))?;
        Ok(Self { client })
    }

    /// Path of the event listing for the days from `first` up to, but not
    /// including, `end`.
    fn events_path(first: NaiveDate, end: NaiveDate) -> String {
        format!(
            "eventapi/EventDates/byStartDate/{}/byEndDate/{}",
            first.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        )
    }

    /// The endpoint is day-granular; cover every day the window touches.
    fn date_range(window: &TimeWindow) -> (NaiveDate, NaiveDate) {
        let first = window.start.date();
        let last = if window.end.time() == NaiveTime::MIN && window.end > window.start {
            window.end.date()
        } else {
            window.end.date() + Days::new(1)
        };
        (first, last.max(first + Days::new(1)))
    }
}

impl RoomDirectory for CampusApiProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn fetch_room_catalog(&self) -> BoxFuture<'_, ProviderResult<DecodedFeed<RawRoomRecord>>> {
        Box::pin(async move {
            let values = self
                .client
                .get_records(ROOMS_PATH, ROOMS_API_VERSION)
                .await
                .map_err(|e| e.with_provider(PROVIDER_NAME))?;

            let feed: DecodedFeed<RawRoomRecord> = decode_records(values, RecordKind::Room);
            info!(
                records = feed.records.len(),
                rejected = feed.rejected.len(),
                "Fetched room directory"
            );
            Ok(feed)
        })
    }
}

impl EventFeed for CampusApiProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn fetch_events(
        &self,
        window: TimeWindow,
    ) -> BoxFuture<'_, ProviderResult<DecodedFeed<RawEventRecord>>> {
        Box::pin(async move {
            let (first, end) = Self::date_range(&window);
            let path = Self::events_path(first, end);
            debug!(%first, %end, "Fetching event dates");

            let values = self
                .client
                .get_records(&path, EVENTS_API_VERSION)
                .await
                .map_err(|e| e.with_provider(PROVIDER_NAME))?;

            let feed: DecodedFeed<RawEventRecord> = decode_records(values, RecordKind::Event);
            info!(
                records = feed.records.len(),
                rejected = feed.rejected.len(),
                "Fetched event feed"
            );
            Ok(feed)
        })
    }
}
