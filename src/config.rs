// config.rs
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use std::{env, fmt::Display, fs::read_to_string, str::FromStr};

use thiserror::Error;
use tracing::{info, warn};

use crate::geocoding::{
    default_fallback_addresses, AddressSuggestion, GeocodeError, Geocoder, NominatimClient,
    RegionPreference,
};

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
const NOMINATIM_SEARCH: &str = "https://nominatim.openstreetmap.org/search";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("Failed to read {path}: {reason}")]
    File { path: String, reason: String },
}

#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    pub endpoint: String,
    pub user_agent: String,
    pub country_codes: String,
    pub timeout: Duration,
    pub region: RegionPreference,
    pub fallback_addresses: Vec<AddressSuggestion>,
}

impl GeocoderConfig {
    pub fn build_geocoder(&self) -> Result<Geocoder, GeocodeError> {
        let client = NominatimClient::new(
            self.endpoint.clone(),
            &self.user_agent,
            self.country_codes.clone(),
            self.timeout,
        )?;
        Ok(Geocoder::new(
            Box::new(client),
            self.region.clone(),
            self.fallback_addresses.clone(),
        ))
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub max_workers: usize,
    pub database_path: String,
    pub schema_path: String,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub geocoder: GeocoderConfig,
}

impl Config {
    /// Reads every `FINDER_*` variable, falling back to defaults for unset ones.
    pub fn load() -> Result<Self, ConfigError> {
        let fallback_addresses = match var("FINDER_FALLBACK_ADDRESSES") {
            Some(path) => load_fallback_addresses(&path)?,
            None => default_fallback_addresses(),
        };

        Ok(Self {
            bind_addr: try_load("FINDER_ADDR", "127.0.0.1:3000")?,
            max_workers: try_load("FINDER_WORKERS", "8")?,
            database_path: try_load("FINDER_DB", "finder.sqlite3")?,
            schema_path: try_load("FINDER_SCHEMA", "sql/schema.sql")?,
            upload_dir: try_load("FINDER_UPLOAD_DIR", "uploads")?,
            max_upload_bytes: try_load(
                "FINDER_MAX_UPLOAD_BYTES",
                &DEFAULT_MAX_UPLOAD_BYTES.to_string(),
            )?,
            geocoder: GeocoderConfig {
                endpoint: try_load("FINDER_GEOCODER_URL", NOMINATIM_SEARCH)?,
                user_agent: try_load("FINDER_GEOCODER_USER_AGENT", "716Finder/1.0")?,
                country_codes: try_load("FINDER_COUNTRY_CODES", "us")?,
                timeout: Duration::from_secs(try_load("FINDER_GEOCODER_TIMEOUT_SECS", "10")?),
                region: RegionPreference::default(),
                fallback_addresses,
            },
        })
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let raw = var(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.trim().parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }
    })
}

/// JSON array of `{ id, display_name, lat, lon }` objects.
pub fn load_fallback_addresses(path: &str) -> Result<Vec<AddressSuggestion>, ConfigError> {
    let raw = read_to_string(path).map_err(|e| ConfigError::File {
        path: path.to_string(),
        reason: e.to_string(),
    })?;

    let list: Vec<AddressSuggestion> =
        serde_json::from_str(&raw).map_err(|e| ConfigError::File {
            path: path.to_string(),
            reason: e.to_string(),
        })?;

    info!(count = list.len(), path, "loaded fallback addresses");
    Ok(list)
}
