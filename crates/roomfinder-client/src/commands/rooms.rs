//! The room catalog listing.

use roomfinder_core::Room;
use tracing::info;

use crate::config::ClientConfig;
use crate::error::ClientResult;

use super::{build_service, print_json};

/// Prints every room of the normalized catalog.
pub async fn run(config: &ClientConfig, json: bool, limit: Option<usize>) -> ClientResult<()> {
    let service = build_service(config)?;
    let catalog = service.room_catalog().await?;

    if !catalog.issues.is_empty() {
        info!(dropped = catalog.issues.len(), "Some directory records were unusable");
    }

    let rooms = match limit.or(config.display.limit) {
        Some(limit) => &catalog.items[..limit.min(catalog.items.len())],
        None => &catalog.items[..],
    };

    if json {
        return print_json(&rooms);
    }

    for room in rooms {
        println!("{}", describe(room));
    }
    Ok(())
}

/// One line per room: number, capacity, floor and system IDs.
pub(crate) fn describe(room: &Room) -> String {
    let mut parts = vec![room.number.to_string()];
    if let Some(capacity) = room.capacity {
        parts.push(format!("{capacity} seats"));
    }
    if let Some(ref floor) = room.floor {
        parts.push(format!("floor {floor}"));
    }
    if !room.system_ids.is_empty() {
        let ids: Vec<&str> = room.system_ids.iter().map(String::as_str).collect();
        parts.push(format!("ids {}", ids.join(",")));
    }
    parts.join("  ")
}
