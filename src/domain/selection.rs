// src/domain/selection.rs
use serde::Serialize;

use crate::domain::listing::{Coordinates, Listing};

/// Zoom used when the map follows a selected listing.
pub const DETAIL_ZOOM: u8 = 16;
/// Popup opens this long after the recenter so the pan starts first.
pub const POPUP_DELAY_MS: u64 = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Nothing selected.
    Unselected,
    /// An id is selected but no loaded listing carries it yet.
    /// Rendered like `Unselected`.
    ListView,
    /// The selected listing is loaded; the detail panel is shown.
    DetailView,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    CardClicked(i64),
    MarkerClicked(i64),
    DetailClosed,
    ListingsLoaded(Vec<Listing>),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MapCommand {
    Recenter { center: Coordinates, zoom: u8 },
    OpenPopup { listing_id: i64, delay_ms: u64 },
}

/// Selection shared by the list and the map. One writer; last write wins.
#[derive(Debug, Default)]
pub struct SelectionSync {
    listings: Vec<Listing>,
    selected: Option<i64>,
}

impl SelectionSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_id(&self) -> Option<i64> {
        self.selected
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn selected_listing(&self) -> Option<&Listing> {
        let id = self.selected?;
        self.listings.iter().find(|l| l.id == id)
    }

    pub fn view_mode(&self) -> ViewMode {
        match (self.selected, self.selected_listing()) {
            (None, _) => ViewMode::Unselected,
            (Some(_), Some(_)) => ViewMode::DetailView,
            (Some(_), None) => ViewMode::ListView,
        }
    }

    pub fn apply(&mut self, event: SelectionEvent) -> Vec<MapCommand> {
        match event {
            SelectionEvent::CardClicked(id) | SelectionEvent::MarkerClicked(id) => {
                self.selected = Some(id);
                self.follow_selection()
            }
            SelectionEvent::DetailClosed => {
                self.selected = None;
                Vec::new()
            }
            SelectionEvent::ListingsLoaded(listings) => {
                let was = self.view_mode();
                self.listings = listings;
                match (was, self.view_mode()) {
                    (ViewMode::ListView, ViewMode::DetailView) => self.follow_selection(),
                    _ => Vec::new(),
                }
            }
        }
    }

    fn follow_selection(&self) -> Vec<MapCommand> {
        let Some(listing) = self.selected_listing() else {
            return Vec::new();
        };
        let Some(center) = listing.coordinates.filter(Coordinates::is_valid) else {
            return Vec::new();
        };

        vec![
            MapCommand::Recenter {
                center,
                zoom: DETAIL_ZOOM,
            },
            MapCommand::OpenPopup {
                listing_id: listing.id,
                delay_ms: POPUP_DELAY_MS,
            },
        ]
    }
}
