// geocoder.rs
use crate::geocoding::client::{PlaceSearch, SearchQuery};
use crate::geocoding::validate::{is_valid_address, looks_like_zipcode, zipcode_validation_error};
use crate::geocoding::{AddressParts, AddressSuggestion, GeocodeError, GeocodeResult, NominatimPlace};
use serde::Deserialize;
use tracing::{info, warn};

pub const MAX_SUGGESTIONS: usize = 5;

/// Soft preference applied to autocomplete results.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegionPreference {
    /// Lowercase city name, e.g. "buffalo".
    pub city: String,
    /// Lowercase spellings of the state, e.g. "ny", "new york".
    pub state_terms: Vec<String>,
    /// ISO country code Nominatim reports, e.g. "us".
    pub country_code: String,
    /// Appended to every suggestion query to bias the search.
    pub query_suffix: String,
}

impl Default for RegionPreference {
    fn default() -> Self {
        Self {
            city: "buffalo".to_string(),
            state_terms: vec!["ny".to_string(), "new york".to_string()],
            country_code: "us".to_string(),
            query_suffix: "Buffalo, NY, USA".to_string(),
        }
    }
}

impl RegionPreference {
    fn matches(&self, place: &NominatimPlace) -> bool {
        let Some(address) = place.address.as_ref() else {
            return false;
        };

        let in_country = address
            .country_code
            .as_deref()
            .is_some_and(|c| c.eq_ignore_ascii_case(&self.country_code));
        if !in_country {
            return false;
        }

        let city_hit = address
            .locality()
            .is_some_and(|c| c.to_lowercase().contains(&self.city));
        let state_hit = address
            .state
            .as_deref()
            .is_some_and(|s| self.is_state(s));

        let display = place.display_name.to_lowercase();
        let display_hit = display.contains(&self.city)
            || display.split(',').any(|segment| self.is_state(segment));

        city_hit || state_hit || display_hit
    }

    fn is_state(&self, candidate: &str) -> bool {
        let candidate = candidate.trim().to_lowercase();
        self.state_terms.iter().any(|t| *t == candidate)
    }
}

pub struct Geocoder {
    search: Box<dyn PlaceSearch>,
    region: RegionPreference,
    fallback: Vec<AddressSuggestion>,
}

impl Geocoder {
    pub fn new(
        search: Box<dyn PlaceSearch>,
        region: RegionPreference,
        fallback: Vec<AddressSuggestion>,
    ) -> Self {
        Self {
            search,
            region,
            fallback,
        }
    }

    /// Resolve free text or a ZIP code to its single best match.
    pub fn geocode(&self, query: &str) -> Result<GeocodeResult, GeocodeError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }

        if looks_like_zipcode(trimmed) {
            if let Some(msg) = zipcode_validation_error(trimmed) {
                return Err(GeocodeError::InvalidZipcode(msg.to_string()));
            }
        }

        let places = self
            .search
            .search(&SearchQuery {
                q: trimmed.to_string(),
                limit: 1,
            })
            .map_err(|e| {
                warn!(query = trimmed, error = %e, "geocoding failed");
                e
            })?;

        let place = places.into_iter().next().ok_or_else(|| {
            info!(query = trimmed, "geocoding returned no results");
            GeocodeError::NotFound
        })?;

        let (latitude, longitude) = parse_position(&place)?;

        Ok(GeocodeResult {
            latitude,
            longitude,
            address: place.address.as_ref().map(AddressParts::from).unwrap_or_default(),
            display_name: place.display_name,
        })
    }

    /// Up to five candidates for a partially typed address.
    ///
    /// Never fails: a failed request yields the configured fallback set.
    pub fn suggest(&self, partial: &str) -> Vec<AddressSuggestion> {
        let trimmed = partial.trim();
        if !is_valid_address(trimmed) {
            return Vec::new();
        }

        let q = if self.region.query_suffix.is_empty() {
            trimmed.to_string()
        } else {
            format!("{trimmed}, {}", self.region.query_suffix)
        };

        let places = match self.search.search(&SearchQuery {
            q,
            limit: MAX_SUGGESTIONS as u8,
        }) {
            Ok(places) => places,
            Err(e) => {
                warn!(query = trimmed, error = %e, "address search failed, using fallback addresses");
                return self.fallback.clone();
            }
        };

        let preferred: Vec<&NominatimPlace> =
            places.iter().filter(|p| self.region.matches(p)).collect();

        let chosen: Vec<&NominatimPlace> = if preferred.is_empty() {
            places.iter().take(MAX_SUGGESTIONS).collect()
        } else {
            preferred.into_iter().take(MAX_SUGGESTIONS).collect()
        };

        chosen.into_iter().filter_map(to_suggestion).collect()
    }

    pub fn fallback_addresses(&self) -> &[AddressSuggestion] {
        &self.fallback
    }
}

fn parse_position(place: &NominatimPlace) -> Result<(f64, f64), GeocodeError> {
    let lat = place
        .lat
        .trim()
        .parse::<f64>()
        .map_err(|e| GeocodeError::Decode(format!("lat {:?}: {e}", place.lat)))?;
    let lon = place
        .lon
        .trim()
        .parse::<f64>()
        .map_err(|e| GeocodeError::Decode(format!("lon {:?}: {e}", place.lon)))?;
    Ok((lat, lon))
}

fn to_suggestion(place: &NominatimPlace) -> Option<AddressSuggestion> {
    let (latitude, longitude) = parse_position(place).ok()?;
    let id = place
        .place_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| place.display_name.clone());

    Some(AddressSuggestion {
        id,
        display_name: place.display_name.clone(),
        latitude,
        longitude,
        address: place.address.as_ref().map(AddressParts::from).unwrap_or_default(),
    })
}

/// Shipped when no fallback file is configured.
pub fn default_fallback_addresses() -> Vec<AddressSuggestion> {
    let buffalo = AddressParts {
        city: Some("Buffalo".to_string()),
        state: Some("NY".to_string()),
        country: Some("USA".to_string()),
        ..AddressParts::default()
    };

    [
        ("fallback-1", "Delaware Park, Buffalo, NY, USA", 42.93, -78.86),
        ("fallback-2", "Elmwood Village, Buffalo, NY, USA", 42.92, -78.87),
        ("fallback-3", "University at Buffalo, Buffalo, NY, USA", 42.89, -78.87),
    ]
    .into_iter()
    .map(|(id, name, lat, lon)| AddressSuggestion {
        id: id.to_string(),
        display_name: name.to_string(),
        latitude: lat,
        longitude: lon,
        address: buffalo.clone(),
    })
    .collect()
}
