//! Live seat occupancy of the study areas.

use roomfinder_providers::{OccupancyRow, fallback_rows};
use tracing::debug;

use crate::config::{ClientConfig, SeatfinderSettings};
use crate::error::ClientResult;

use super::print_json;

/// Prints one line per study location.
pub async fn run(config: &ClientConfig, json: bool) -> ClientResult<()> {
    let rows = fetch(&config.seatfinder).await?;

    if json {
        return print_json(&rows);
    }

    for row in &rows {
        println!("{}", describe(row));
    }
    Ok(())
}

#[cfg(feature = "seatfinder")]
async fn fetch(settings: &SeatfinderSettings) -> ClientResult<Vec<OccupancyRow>> {
    use std::time::Duration;

    use roomfinder_providers::OccupancyFeed;
    use roomfinder_providers::seatfinder::{DEFAULT_SEATFINDER_URL, SeatFinderClient};

    if !settings.enabled {
        debug!("Seat finder disabled, using defaults");
        return Ok(fallback_rows());
    }

    let url = settings.url.as_deref().unwrap_or(DEFAULT_SEATFINDER_URL);
    let client = SeatFinderClient::new(url, Duration::from_secs(settings.timeout_secs))?;
    Ok(client.fetch_live_occupancy().await)
}

#[cfg(not(feature = "seatfinder"))]
async fn fetch(_settings: &SeatfinderSettings) -> ClientResult<Vec<OccupancyRow>> {
    debug!("Built without seat finder support, using defaults");
    Ok(fallback_rows())
}

fn describe(row: &OccupancyRow) -> String {
    let count = |n: Option<u32>| n.map_or_else(|| "-".to_string(), |n| n.to_string());
    format!(
        "{}: {} free / {} occupied ({} seats)",
        row.location,
        count(row.free),
        count(row.occupied),
        count(row.total())
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_counts() {
        let row = OccupancyRow::new("theCo", Some(12), Some(68));
        assert_eq!(describe(&row), "theCo: 12 free / 68 occupied (80 seats)");
    }

    #[test]
    fn unknown_counts_show_dash() {
        let row = OccupancyRow::new("theStage", None, Some(3));
        assert_eq!(describe(&row), "theStage: - free / 3 occupied (- seats)");
    }

    #[tokio::test]
    async fn disabled_uses_fallback() {
        let settings = SeatfinderSettings {
            enabled: false,
            ..Default::default()
        };
        let rows = fetch(&settings).await.unwrap();
        assert_eq!(rows, fallback_rows());
    }
}
