use crate::templates::desktop_layout;
use maud::{html, Markup};

/// Full error page for anything a handler could not recover from.
pub fn error_page(status: u16, message: &str) -> Markup {
    desktop_layout(
        &format!("Error {status}"),
        html! {
            main class="container error-page" {
                h1 { "Error " (status) }
                p { (message) }
                p { a href="/" { "← Back to listings" } }
            }
        },
    )
}

/// Inline message under a form field.
pub fn field_error(message: Option<&str>) -> Markup {
    html! {
        @if let Some(msg) = message {
            p class="field-error" role="alert" { (msg) }
        }
    }
}
