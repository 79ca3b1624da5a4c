//! HTTP client for the seat-finder page.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, warn};
use url::Url;

use crate::error::{ProviderError, ProviderResult};
use crate::occupancy::{OccupancyRow, fallback_rows, parse_seatfinder_page};
use crate::provider::{BoxFuture, OccupancyFeed};

/// Public seat-finder page.
pub const DEFAULT_SEATFINDER_URL: &str = "https://seatfinder.unisg.ch/";

const PROVIDER_NAME: &str = "seatfinder";

/// Fetches live occupancy from the seat-finder page.
pub struct SeatFinderClient {
    client: Client,
    url: Url,
}

impl SeatFinderClient {
    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

    /// Creates a new client for the page at `url`.
    pub fn new(url: impl AsRef<str>, timeout: Duration) -> ProviderResult<Self> {
        let url = Url::parse(url.as_ref()).map_err(|e| {
            ProviderError::configuration(format!("Invalid seat-finder URL: {}", e))
                .with_provider(PROVIDER_NAME)
        })?;

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(format!("roomfinder/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                ProviderError::network(format!("Failed to create HTTP client: {}", e))
                    .with_provider(PROVIDER_NAME)
            })?;

        Ok(Self { client, url })
    }

    /// Returns the page URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Fetches and parses the page, without falling back.
    pub async fn fetch_page(&self) -> ProviderResult<Vec<OccupancyRow>> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| {
                let error = if e.is_timeout() {
                    ProviderError::timeout(format!("Request timed out: {}", e))
                } else {
                    ProviderError::network(format!("Request failed: {}", e))
                };
                error.with_provider(PROVIDER_NAME).with_source(e)
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ProviderError::from_status(status.as_u16(), "").with_provider(PROVIDER_NAME));
        }

        let html = response.text().await.map_err(|e| {
            ProviderError::network(format!("Failed to read response: {}", e))
                .with_provider(PROVIDER_NAME)
                .with_source(e)
        })?;

        let rows = parse_seatfinder_page(&html);
        if rows.is_empty() {
            return Err(ProviderError::invalid_response("No seat-finder tables on page")
                .with_provider(PROVIDER_NAME));
        }

        debug!(locations = rows.len(), "Parsed seat-finder page");
        Ok(rows)
    }
}

impl OccupancyFeed for SeatFinderClient {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn fetch_live_occupancy(&self) -> BoxFuture<'_, Vec<OccupancyRow>> {
        Box::pin(async move {
            match self.fetch_page().await {
                Ok(rows) => rows,
                Err(e) => {
                    warn!(error = %e, "Live occupancy unavailable, using defaults");
                    fallback_rows()
                }
            }
        })
    }
}
