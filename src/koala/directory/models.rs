//! Directory model definitions

use crate::koala::types::{GeoPoint, User};
use serde::{Deserialize, Serialize};

/// A nearby friend's library as listed on the friends screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendLibrary {
    pub id: String,
    pub owner: User,
    /// Distance label as supplied, e.g. "0.3 miles"; never derived from coordinates
    pub distance: String,
    pub book_count: u32,
    pub coordinate: GeoPoint,
}

impl FriendLibrary {
    pub fn display_name(&self) -> &str {
        self.owner.display_name()
    }

    /// Marker for the map collaborator
    pub fn marker(&self) -> MapMarker {
        MapMarker {
            library_id: self.id.clone(),
            coordinate: self.coordinate,
            title: self.display_name().to_string(),
            description: format!("{} books", self.book_count),
        }
    }

    /// Secondary list line: `0.3 miles • 42 books`
    pub fn details(&self) -> String {
        format!("{} • {} books", self.distance, self.book_count)
    }
}

/// What the map renderer needs to place one marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapMarker {
    pub library_id: String,
    pub coordinate: GeoPoint,
    pub title: String,
    pub description: String,
}
