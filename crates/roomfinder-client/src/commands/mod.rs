//! Subcommand implementations.

pub mod config;
pub mod free;
pub mod occupancy;
pub mod rooms;
pub mod route;
pub mod schedule;

use std::sync::Arc;

use roomfinder_core::RoomNumber;
use roomfinder_providers::FreeRoomService;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Builds the free-room service from configuration.
///
/// Offline files win over the campus API when both are configured.
pub fn build_service(config: &ClientConfig) -> ClientResult<FreeRoomService> {
    let service = if let Some(files) = config.files.provider().map_err(ClientError::Config)? {
        debug!(rooms = %files.rooms_path().display(), events = %files.events_path().display(), "Using offline feed files");
        let files = Arc::new(files);
        FreeRoomService::new(files.clone(), files)
    } else {
        campus_service(config)?
    };

    Ok(service
        .with_fetch_timeout(config.api.timeout())
        .with_ranker(config.query.ranker()))
}

#[cfg(feature = "campus")]
fn campus_service(config: &ClientConfig) -> ClientResult<FreeRoomService> {
    use roomfinder_providers::campus::CampusApiProvider;

    let provider_config = config.api.to_provider_config().map_err(ClientError::Config)?;
    let provider = Arc::new(CampusApiProvider::new(provider_config)?);
    Ok(FreeRoomService::new(provider.clone(), provider))
}

#[cfg(not(feature = "campus"))]
fn campus_service(_config: &ClientConfig) -> ClientResult<FreeRoomService> {
    Err(ClientError::Config(
        "built without campus API support; set files.rooms and files.events".to_string(),
    ))
}

/// Parses a room number given on the command line.
pub(crate) fn parse_room(input: &str) -> ClientResult<RoomNumber> {
    RoomNumber::parse(input.trim()).map_err(|e| ClientError::InvalidInput(e.to_string()))
}

/// Prints a value as pretty JSON.
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> ClientResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| ClientError::Action(format!("failed to serialize output: {}", e)))?;
    println!("{}", json);
    Ok(())
}
