//! Provider capability traits.
//!
//! The free-room service needs three kinds of upstream data, each behind its
//! own trait so sources can be mixed (campus API for rooms, a file for
//! events, and so on):
//!
//! - [`RoomDirectory`]: the raw room catalog
//! - [`EventFeed`]: raw events for a time window
//! - [`OccupancyFeed`]: live seat counts of study areas
//!
//! Providers return raw records; normalization happens in
//! [`crate::normalize`].

use std::future::Future;
use std::pin::Pin;

use roomfinder_core::TimeWindow;

use crate::error::{ProviderError, ProviderResult};
use crate::occupancy::OccupancyRow;
use crate::raw::{DecodedFeed, RawEventRecord, RawRoomRecord};

/// A boxed future for async trait methods.
///
/// Boxed futures keep the traits object-safe, so providers can be held as
/// `Arc<dyn RoomDirectory>`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Source of the room directory.
pub trait RoomDirectory: Send + Sync {
    /// Returns the name of this provider (e.g., "campus-api", "file").
    fn name(&self) -> &str;

    /// Fetches every directory record.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` when the directory as a whole cannot be read.
    /// Individual bad records end up in [`DecodedFeed::rejected`].
    fn fetch_room_catalog(&self) -> BoxFuture<'_, ProviderResult<DecodedFeed<RawRoomRecord>>>;
}

/// Source of scheduled events.
pub trait EventFeed: Send + Sync {
    /// Returns the name of this provider.
    fn name(&self) -> &str;

    /// Fetches the events of `window`.
    ///
    /// Providers may return records outside the window; the normalizer
    /// drops them.
    fn fetch_events(
        &self,
        window: TimeWindow,
    ) -> BoxFuture<'_, ProviderResult<DecodedFeed<RawEventRecord>>>;
}

/// Source of live seat occupancy.
///
/// Occupancy is informational, so this never fails: implementations fall
/// back to default rows instead.
pub trait OccupancyFeed: Send + Sync {
    /// Returns the name of this provider.
    fn name(&self) -> &str;

    /// Fetches the current seat counts per study location.
    fn fetch_live_occupancy(&self) -> BoxFuture<'_, Vec<OccupancyRow>>;
}

/// A provider that always returns an error.
///
/// Stands in for a source that failed to initialize, so the error surfaces
/// on first use with the provider's name attached.
#[derive(Debug)]
pub struct UnavailableProvider {
    name: String,
    error: ProviderError,
}

impl UnavailableProvider {
    /// Creates a new unavailable provider.
    pub fn new(name: impl Into<String>, error: ProviderError) -> Self {
        Self {
            name: name.into(),
            error,
        }
    }

    fn error(&self) -> ProviderError {
        ProviderError::new(self.error.code(), self.error.message()).with_provider(&self.name)
    }
}

impl RoomDirectory for UnavailableProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch_room_catalog(&self) -> BoxFuture<'_, ProviderResult<DecodedFeed<RawRoomRecord>>> {
        let error = self.error();
        Box::pin(async move { Err(error) })
    }
}

impl EventFeed for UnavailableProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch_events(
        &self,
        _window: TimeWindow,
    ) -> BoxFuture<'_, ProviderResult<DecodedFeed<RawEventRecord>>> {
        let error = self.error();
        Box::pin(async move { Err(error) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderErrorCode;
    use chrono::NaiveDate;

    fn window() -> TimeWindow {
        TimeWindow::for_date(NaiveDate::from_ymd_opt(2025, 3, 4).unwrap())
    }

    #[tokio::test]
    async fn unavailable_provider_fails_catalog() {
        let provider =
            UnavailableProvider::new("campus-api", ProviderError::configuration("no token"));

        assert_eq!(RoomDirectory::name(&provider), "campus-api");

        let err = provider.fetch_room_catalog().await.unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::ConfigurationError);
        assert_eq!(err.provider(), Some("campus-api"));
        assert_eq!(err.message(), "no token");
    }

    #[tokio::test]
    async fn unavailable_provider_fails_events() {
        let provider = UnavailableProvider::new("file", ProviderError::not_found("events.json"));

        let err = provider.fetch_events(window()).await.unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::NotFound);
        assert_eq!(err.to_string(), "[file] not_found: events.json");
    }

    #[test]
    fn traits_are_object_safe() {
        let provider = std::sync::Arc::new(UnavailableProvider::new(
            "test",
            ProviderError::internal("boom"),
        ));
        let directory: std::sync::Arc<dyn RoomDirectory> = provider.clone();
        let feed: std::sync::Arc<dyn EventFeed> = provider;

        assert_eq!(directory.name(), "test");
        assert_eq!(feed.name(), "test");
    }
}
