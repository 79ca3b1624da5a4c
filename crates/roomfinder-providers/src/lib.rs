//! Feed providers and the free-room service.
//!
//! This crate connects the pure domain in `roomfinder-core` to the outside
//! world:
//!
//! - [`RoomDirectory`], [`EventFeed`], [`OccupancyFeed`] - capability traits
//!   for upstream sources
//! - [`raw`] - raw feed records as they arrive
//! - [`normalize`] - raw records to canonical rooms and events
//! - [`FreeRoomService`] - fetch, normalize, resolve and rank in one call
//! - [`ProviderError`], [`ResolveError`] - error types
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐
//! │   Campus API    │    │   JSON files    │
//! └────────┬────────┘    └────────┬────────┘
//!          │                      │
//!          ▼                      ▼
//! ┌─────────────────┐    ┌─────────────────┐
//! │CampusApiProvider│    │  FileProvider   │
//! └────────┬────────┘    └────────┬────────┘
//!          │                      │
//!          │ RoomDirectory/EventFeed
//!          └──────────┬───────────┘
//!                     │
//!                     ▼ normalize_*()
//!              ┌──────────────────┐
//!              │ Room / Scheduled │
//!              │      Event       │
//!              └────────┬─────────┘
//!                       │
//!                       ▼ resolve / rank
//!              ┌──────────────────┐
//!              │  FreeRoomService │
//!              └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use roomfinder_core::AvailabilityQuery;
//! use roomfinder_providers::{FileProvider, FreeRoomService};
//!
//! let files = Arc::new(FileProvider::new("rooms.json", "events.json"));
//! let service = FreeRoomService::new(files.clone(), files);
//! let report = service.find_free_rooms(&AvailabilityQuery::at(start), today).await?;
//! ```

#[cfg(feature = "campus")]
pub mod campus;
pub mod error;
pub mod file;
pub mod normalize;
pub mod occupancy;
pub mod provider;
pub mod raw;
#[cfg(feature = "seatfinder")]
pub mod seatfinder;
pub mod service;

// Re-export main types at crate root
pub use error::{ProviderError, ProviderErrorCode, ProviderResult, ResolveError};
pub use file::FileProvider;
pub use normalize::{
    Normalized, normalize_event, normalize_event_feed, normalize_events, normalize_room_feed,
    normalize_rooms,
};
pub use occupancy::{OccupancyRow, STUDY_LOCATIONS, fallback_rows, parse_seatfinder_page};
pub use provider::{BoxFuture, EventFeed, OccupancyFeed, RoomDirectory, UnavailableProvider};
pub use raw::{DecodedFeed, RawEventRecord, RawRoomRecord, decode_records};
pub use service::{
    DEFAULT_FETCH_TIMEOUT, FreeRoomReport, FreeRoomService, ResolvedRooms, RoomSchedule,
};
