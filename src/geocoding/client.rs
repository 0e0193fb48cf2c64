// client.rs
use crate::geocoding::{GeocodeError, NominatimPlace};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// One outbound address search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub q: String,
    pub limit: u8,
}

/// Raw place search against some geocoding backend.
///
/// Implementations issue exactly one request per call: no caching, no retry.
pub trait PlaceSearch: Send + Sync {
    fn search(&self, query: &SearchQuery) -> Result<Vec<NominatimPlace>, GeocodeError>;
}

pub struct NominatimClient {
    client: Client,
    endpoint: String,
    country_codes: String,
}

impl NominatimClient {
    pub fn new(
        endpoint: impl Into<String>,
        user_agent: &str,
        country_codes: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| GeocodeError::Network(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            country_codes: country_codes.into(),
        })
    }
}

impl PlaceSearch for NominatimClient {
    fn search(&self, query: &SearchQuery) -> Result<Vec<NominatimPlace>, GeocodeError> {
        let limit = query.limit.to_string();
        let params = [
            ("q", query.q.as_str()),
            ("format", "json"),
            ("limit", limit.as_str()),
            ("countrycodes", self.country_codes.as_str()),
            ("addressdetails", "1"),
        ];

        debug!(q = %query.q, limit = query.limit, "nominatim search");

        let resp = self
            .client
            .get(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&params)
            .send()
            .map_err(|e| GeocodeError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().unwrap_or_else(|_| "(no body)".to_string());
            warn!(%status, "nominatim returned an error status");
            return Err(GeocodeError::Network(format!("HTTP {status}: {text}")));
        }

        resp.json::<Vec<NominatimPlace>>()
            .map_err(|e| GeocodeError::Decode(e.to_string()))
    }
}
