use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("Please enter a valid address or ZIP code")]
    EmptyQuery,

    #[error("{0}")]
    InvalidZipcode(String),

    #[error("Address or ZIP code not found")]
    NotFound,

    #[error("Geocoding request failed: {0}")]
    Network(String),

    #[error("Unexpected geocoder response: {0}")]
    Decode(String),
}

impl GeocodeError {
    /// True for failures caused by what the user typed rather than the service.
    pub fn is_user_error(&self) -> bool {
        matches!(self, GeocodeError::EmptyQuery | GeocodeError::InvalidZipcode(_))
    }
}
