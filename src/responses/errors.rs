use crate::errors::ServerError;
use crate::templates::error_page;
use astra::{Body, Response, ResponseBuilder};

pub type ResultResp = Result<Response, ServerError>;

/// Convert a ServerError into a proper HTML response
pub fn error_to_response(err: ServerError) -> Response {
    let status = err.status();
    let message = match &err {
        ServerError::DbError(_) | ServerError::InternalError => {
            "Something went wrong on our side. Please try again.".to_string()
        }
        ServerError::Geocoding(e) => e.to_string(),
        ServerError::BadRequest(msg) | ServerError::Upload(msg) => msg.clone(),
        ServerError::NotFound => "Not Found".to_string(),
    };
    html_error_response(status, &message)
}

/// Build an HTML error page
pub fn html_error_response(status: u16, message: &str) -> Response {
    let html = error_page(status, message).into_string();

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "text/html; charset=utf-8")
        .body(Body::from(html))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
