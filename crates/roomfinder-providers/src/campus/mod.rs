//! Campus API provider.
//!
//! Fetches the room directory (`toolapi/Rooms`, API version 1) and the
//! day-granular event listing (`eventapi/EventDates/byStartDate/../byEndDate/..`,
//! API version 3) from the university API gateway.
//!
//! # Example
//!
//! ```ignore
//! use roomfinder_providers::campus::{CampusApiConfig, CampusApiProvider};
//!
//! let config = CampusApiConfig::new(CampusApiConfig::DEFAULT_BASE_URL)?
//!     .with_token(token);
//!
//! let provider = CampusApiProvider::new(config)?;
//! let feed = provider.fetch_room_catalog().await?;
//! ```

mod client;
mod config;
mod provider;

pub use client::CampusApiClient;
pub use config::CampusApiConfig;
pub use provider::CampusApiProvider;
