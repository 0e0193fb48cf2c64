use maud::{html, Markup};

pub mod error;
pub mod listing;
pub mod map;
pub mod search_bar;
pub mod suggestions;

pub use error::{error_page, field_error};
pub use listing::{detail_panel, listing_card};
pub use map::{map_view, MapConfig, MarkerView};
pub use search_bar::search_bar;
pub use suggestions::suggestion_list;

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        section class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}
