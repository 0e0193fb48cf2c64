// Blocking search-as-you-type for callers that hold a session open. The web
// form debounces in the browser through htmx, so the server never builds one.
#[cfg_attr(not(test), allow(dead_code))]
pub mod autocomplete;
mod client;
mod geocode_error;
mod geocoder;
mod models;
mod validate;

pub use client::{NominatimClient, PlaceSearch, SearchQuery};
pub use geocode_error::GeocodeError;
pub use geocoder::{default_fallback_addresses, Geocoder, RegionPreference};
pub use models::{AddressParts, AddressSuggestion, GeocodeResult, NominatimAddress, NominatimPlace};
pub use validate::{
    default_location, is_valid_address, DEFAULT_LOCATION_LABEL, is_valid_zipcode, looks_like_zipcode,
    zipcode_validation_error,
};
