// errors.rs
use crate::geocoding::GeocodeError;
use thiserror::Error;

/// Errors originating from either the server logic
/// (routing, missing resources, etc.) or downstream layers (DB, geocoder, disk).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Database Error: {0}")]
    DbError(String),

    #[error("Geocoding Error: {0}")]
    Geocoding(#[from] GeocodeError),

    #[error("Upload Error: {0}")]
    Upload(String),

    #[error("Internal Server Error")]
    InternalError,
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::Upload(_) => 400,
            ServerError::Geocoding(e) if e.is_user_error() => 400,
            ServerError::Geocoding(GeocodeError::NotFound) => 404,
            ServerError::Geocoding(_) => 502,
            ServerError::DbError(_) | ServerError::InternalError => 500,
        }
    }
}

impl From<rusqlite::Error> for ServerError {
    fn from(e: rusqlite::Error) -> Self {
        ServerError::DbError(e.to_string())
    }
}
