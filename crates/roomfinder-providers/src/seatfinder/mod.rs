//! Seat-finder occupancy provider.
//!
//! Scrapes the public seat-finder page for live seat counts. Any failure
//! yields the fallback rows, so callers never see an error.

mod client;

pub use client::{DEFAULT_SEATFINDER_URL, SeatFinderClient};
