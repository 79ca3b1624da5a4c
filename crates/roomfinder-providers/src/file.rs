//! Offline provider reading raw feeds from JSON files.
//!
//! The files hold JSON arrays in the same shape the campus API returns, so
//! a saved API response can be replayed without network access.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use roomfinder_core::{RecordKind, TimeWindow};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{ProviderError, ProviderResult};
use crate::provider::{BoxFuture, EventFeed, RoomDirectory};
use crate::raw::{DecodedFeed, RawEventRecord, RawRoomRecord, decode_records};

const PROVIDER_NAME: &str = "file";

/// Reads the room directory and event feed from local files.
#[derive(Debug, Clone)]
pub struct FileProvider {
    rooms_path: PathBuf,
    events_path: PathBuf,
}

impl FileProvider {
    /// Creates a provider reading from the given files.
    pub fn new(rooms_path: impl Into<PathBuf>, events_path: impl Into<PathBuf>) -> Self {
        Self {
            rooms_path: rooms_path.into(),
            events_path: events_path.into(),
        }
    }

    pub fn rooms_path(&self) -> &Path {
        &self.rooms_path
    }

    pub fn events_path(&self) -> &Path {
        &self.events_path
    }
}

async fn read_records<T: DeserializeOwned>(
    path: &Path,
    kind: RecordKind,
) -> ProviderResult<DecodedFeed<T>> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        let error = match e.kind() {
            ErrorKind::NotFound => ProviderError::not_found(format!("{} does not exist", path.display())),
            _ => ProviderError::internal(format!("Failed to read {}: {}", path.display(), e)),
        };
        error.with_provider(PROVIDER_NAME).with_source(e)
    })?;

    let values: Vec<Value> = serde_json::from_str(&content).map_err(|e| {
        ProviderError::invalid_response(format!(
            "{} is not a JSON array: {}",
            path.display(),
            e
        ))
        .with_provider(PROVIDER_NAME)
        .with_source(e)
    })?;

    debug!(path = %path.display(), records = values.len(), "Read feed file");
    Ok(decode_records(values, kind))
}

impl RoomDirectory for FileProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn fetch_room_catalog(&self) -> BoxFuture<'_, ProviderResult<DecodedFeed<RawRoomRecord>>> {
        Box::pin(async move { read_records(&self.rooms_path, RecordKind::Room).await })
    }
}

impl EventFeed for FileProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn fetch_events(
        &self,
        window: TimeWindow,
    ) -> BoxFuture<'_, ProviderResult<DecodedFeed<RawEventRecord>>> {
        Box::pin(async move {
            let mut feed: DecodedFeed<RawEventRecord> =
                read_records(&self.events_path, RecordKind::Event).await?;

            // Records with unreadable times are kept for the normalizer to
            // report.
            let before = feed.records.len();
            feed.records.retain(|record| match (record.start(), record.end()) {
                (Some(start), Some(end)) => window.overlaps(start, end),
                _ => true,
            });

            info!(
                kept = feed.records.len(),
                outside = before - feed.records.len(),
                "Filtered event file to window"
            );
            Ok(feed)
        })
    }
}
