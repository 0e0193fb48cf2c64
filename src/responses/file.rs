// responses/file.rs
use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};

/// Return raw bytes (static assets, uploaded photos)
pub fn bytes_response(content_type: &str, bytes: impl Into<Body>, cache: &str) -> ResultResp {
    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", content_type)
        .header("Cache-Control", cache)
        .body(bytes.into())
        .map_err(|_| ServerError::InternalError)
}
