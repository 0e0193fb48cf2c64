// responses/json.rs
use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};
use serde::Serialize;

pub fn json_response<T: Serialize>(status: u16, value: &T) -> ResultResp {
    let body = serde_json::to_vec(value).map_err(|_| ServerError::InternalError)?;

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .map_err(|_| ServerError::InternalError)
}

/// `{"error": "..."}` with the status the error maps to.
pub fn json_error_response(err: &ServerError) -> ResultResp {
    let message = match err {
        ServerError::DbError(_) | ServerError::InternalError => "Internal Server Error".to_string(),
        ServerError::Geocoding(e) => e.to_string(),
        ServerError::BadRequest(msg) | ServerError::Upload(msg) => msg.clone(),
        ServerError::NotFound => "Not Found".to_string(),
    };
    json_response(err.status(), &serde_json::json!({ "error": message }))
}
