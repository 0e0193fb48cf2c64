// templates/components/map.rs
use maud::{html, Markup};
use serde::Serialize;
use tracing::warn;

use crate::domain::map::{MapMarker, MapViewport, PopupRequest};

/// A marker plus where a click leads.
#[derive(Debug, Serialize)]
pub struct MarkerView {
    #[serde(flatten)]
    pub marker: MapMarker,
    pub href: String,
}

/// Everything `static/map.js` needs to draw the map.
#[derive(Debug, Serialize)]
pub struct MapConfig {
    pub center: [f64; 2],
    pub zoom: u8,
    /// Popup text of the center marker.
    pub center_label: String,
    pub markers: Vec<MarkerView>,
    pub popup: Option<PopupRequest>,
}

impl MapConfig {
    pub fn new(
        viewport: MapViewport,
        center_label: String,
        markers: Vec<MarkerView>,
        popup: Option<PopupRequest>,
    ) -> Self {
        Self {
            center: [viewport.center.latitude, viewport.center.longitude],
            zoom: viewport.zoom,
            center_label,
            markers,
            popup,
        }
    }
}

pub fn map_view(config: &MapConfig) -> Markup {
    let json = serde_json::to_string(config).unwrap_or_else(|e| {
        warn!(error = %e, "map config serialization failed");
        "{}".to_string()
    });

    html! {
        div id="map" class="map" data-config=(json) {
            noscript { p class="muted" { "The map needs JavaScript." } }
        }
    }
}
