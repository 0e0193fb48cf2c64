use serde::{Deserialize, Serialize};

// place
//  ├── place_id
//  ├── lat            (string)
//  ├── lon            (string)
//  ├── display_name
//  └── address
//       ├── house_number
//       ├── road
//       ├── suburb
//       ├── city | town | village
//       ├── state
//       ├── postcode
//       ├── country
//       └── country_code

/// One entry of a Nominatim `/search?format=json` response.
#[derive(Debug, Clone, Deserialize)]
pub struct NominatimPlace {
    pub place_id: Option<i64>,
    pub lat: String,
    pub lon: String,
    pub display_name: String,
    pub address: Option<NominatimAddress>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NominatimAddress {
    pub house_number: Option<String>,
    pub road: Option<String>,
    pub suburb: Option<String>,
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub state: Option<String>,
    pub postcode: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
}

impl NominatimAddress {
    /// Nominatim reports smaller places as town or village instead of city.
    pub fn locality(&self) -> Option<&str> {
        self.city
            .as_deref()
            .or(self.town.as_deref())
            .or(self.village.as_deref())
    }
}

/// Structured address breakdown handed to pages and the JSON API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressParts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub road: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suburb: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl From<&NominatimAddress> for AddressParts {
    fn from(a: &NominatimAddress) -> Self {
        Self {
            house_number: a.house_number.clone(),
            road: a.road.clone(),
            suburb: a.suburb.clone(),
            city: a.locality().map(str::to_string),
            state: a.state.clone(),
            postcode: a.postcode.clone(),
            country: a.country.clone(),
        }
    }
}

/// Single best match for a free-text or ZIP query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeocodeResult {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
    pub address: AddressParts,
}

/// Candidate shown while the user is typing an address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressSuggestion {
    pub id: String,
    pub display_name: String,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
    #[serde(default)]
    pub address: AddressParts,
}
