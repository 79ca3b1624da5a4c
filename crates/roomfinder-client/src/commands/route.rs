//! Indoor-map directions between two rooms.

use roomfinder_core::{MapLink, Room, RoomNumber};
use roomfinder_providers::ResolveError;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

use super::{build_service, parse_room};

/// Prints the directions link from `from` to `to`, opening it on request.
pub async fn run(config: &ClientConfig, from: &str, to: &str, open: bool) -> ClientResult<()> {
    let from = parse_room(from)?;
    let to = parse_room(to)?;

    let service = build_service(config)?;
    let catalog = service.room_catalog().await?;
    let url = directions(&config.map.link(), &catalog.items, &from, &to)?;

    println!("{}", url);

    if open {
        debug!(url = %url, "Opening directions");
        open::that(&url).map_err(|e| ClientError::Action(format!("failed to open link: {}", e)))?;
    }
    Ok(())
}

fn directions(
    link: &MapLink,
    catalog: &[Room],
    from: &RoomNumber,
    to: &RoomNumber,
) -> ClientResult<String> {
    let from = lookup(catalog, from)?;
    let to = lookup(catalog, to)?;

    link.between(from, to).map(|url| url.to_string()).ok_or_else(|| {
        let missing = if from.map_id.is_none() { from } else { to };
        ClientError::Action(format!("room {} has no map location", missing.number))
    })
}

fn lookup<'a>(catalog: &'a [Room], number: &RoomNumber) -> ClientResult<&'a Room> {
    catalog
        .iter()
        .find(|room| &room.number == number)
        .ok_or_else(|| ResolveError::UnknownRoom(number.to_string()).into())
}
