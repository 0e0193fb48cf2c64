pub mod errors;
pub mod file;
pub mod html;
pub mod json;

pub use errors::{error_to_response, ResultResp};

pub use file::bytes_response;
pub use html::{html_response, html_status_response, redirect};
pub use json::{json_error_response, json_response};
