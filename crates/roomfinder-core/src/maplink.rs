//! Indoor-map directions links.
//!
//! ```
//! use roomfinder_core::maplink::MapLink;
//!
//! let link = MapLink::default().directions(1001, 2002).unwrap();
//! assert!(link.as_str().contains("dest=2002&starttype=poi&start=1001"));
//! ```

use serde::{Deserialize, Serialize};
use url::Url;

use crate::room::Room;

/// Base of the embeddable indoor-map page.
pub const MAP_EMBED_URL: &str = "http://use.mazemap.com/embed.html";

/// Campus identifier on the indoor map.
pub const DEFAULT_CAMPUS_ID: u32 = 710;

/// Point-of-interest type used for rooms.
pub const DEFAULT_POI_TYPE: u32 = 36317;

/// Builds directions links between two map locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapLink {
    pub campus_id: u32,
    pub poi_type: u32,
}

impl Default for MapLink {
    fn default() -> Self {
        Self {
            campus_id: DEFAULT_CAMPUS_ID,
            poi_type: DEFAULT_POI_TYPE,
        }
    }
}

impl MapLink {
    pub fn new(campus_id: u32, poi_type: u32) -> Self {
        Self {
            campus_id,
            poi_type,
        }
    }

    /// Directions from one map location to another.
    ///
    /// Returns `None` only if the embed URL fails to parse.
    pub fn directions(&self, from: u64, to: u64) -> Option<Url> {
        let mut url = Url::parse(MAP_EMBED_URL).ok()?;
        url.query_pairs_mut()
            .append_pair("campusid", &self.campus_id.to_string())
            .append_pair("typepois", &self.poi_type.to_string())
            .append_pair("desttype", "poi")
            .append_pair("dest", &to.to_string())
            .append_pair("starttype", "poi")
            .append_pair("start", &from.to_string());
        Some(url)
    }

    /// Directions between two rooms; `None` if either lacks a map location.
    pub fn between(&self, from: &Room, to: &Room) -> Option<Url> {
        self.directions(from.map_id?, to.map_id?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::RoomNumber;

    fn room(number: &str, map_id: Option<u64>) -> Room {
        let room = Room::new(RoomNumber::parse(number).unwrap());
        match map_id {
            Some(id) => room.with_map_id(id),
            None => room,
        }
    }

    #[test]
    fn builds_directions_url() {
        let url = MapLink::default().directions(1001, 2002).unwrap();
        assert_eq!(
            url.as_str(),
            "http://use.mazemap.com/embed.html?campusid=710&typepois=36317&desttype=poi&dest=2002&starttype=poi&start=1001"
        );
    }

    #[test]
    fn custom_campus() {
        let url = MapLink::new(1, 2).directions(3, 4).unwrap();
        assert!(url.as_str().contains("campusid=1&typepois=2"));
    }

    #[test]
    fn rooms_need_map_ids() {
        let link = MapLink::default();
        let a = room("09-010", Some(11));
        let b = room("10-101", Some(22));
        let c = room("01-U102", None);

        assert!(link.between(&a, &b).is_some());
        assert!(link.between(&a, &c).is_none());
        assert!(link.between(&c, &b).is_none());
    }
}
