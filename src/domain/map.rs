use serde::Serialize;

use crate::domain::listing::{Coordinates, Listing, ListingStatus};
use crate::domain::selection::MapCommand;
use crate::geocoding::default_location;

pub const DEFAULT_ZOOM: u8 = 13;

/// Derived view of a listing; recomputed on every render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub id: i64,
    pub position: Coordinates,
    pub status: ListingStatus,
    pub category: String,
    pub title: String,
    pub location: String,
    pub color: &'static str,
}

impl MapMarker {
    pub fn from_listing(listing: &Listing) -> Option<Self> {
        let position = listing.coordinates.filter(Coordinates::is_valid)?;
        Some(Self {
            id: listing.id,
            position,
            status: listing.status,
            category: listing.category().to_string(),
            title: listing.title().to_string(),
            location: listing.location_label(),
            color: listing.status.marker_color(),
        })
    }
}

/// One marker per listing that has usable coordinates, in listing order.
pub fn listings_to_markers(listings: &[Listing]) -> Vec<MapMarker> {
    listings.iter().filter_map(MapMarker::from_listing).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PopupRequest {
    pub listing_id: i64,
    pub delay_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapViewport {
    pub center: Coordinates,
    pub zoom: u8,
}

impl Default for MapViewport {
    fn default() -> Self {
        Self {
            center: default_location(),
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl MapViewport {
    pub fn centered_on(center: Coordinates) -> Self {
        Self {
            center,
            zoom: DEFAULT_ZOOM,
        }
    }

    /// Folds selection commands into the viewport. The last popup wins.
    pub fn apply(&mut self, commands: &[MapCommand]) -> Option<PopupRequest> {
        let mut popup = None;
        for cmd in commands {
            match *cmd {
                MapCommand::Recenter { center, zoom } => {
                    self.center = center;
                    self.zoom = zoom;
                }
                MapCommand::OpenPopup {
                    listing_id,
                    delay_ms,
                } => {
                    popup = Some(PopupRequest {
                        listing_id,
                        delay_ms,
                    });
                }
            }
        }
        popup
    }
}
