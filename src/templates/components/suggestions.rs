use maud::{html, Markup};

use crate::domain::address::format_address;
use crate::geocoding::{is_valid_address, AddressSuggestion};

/// Fragment swapped under the address input on the add-listing form.
pub fn suggestion_list(query: &str, suggestions: &[AddressSuggestion]) -> Markup {
    html! {
        @if suggestions.is_empty() {
            @if is_valid_address(query) {
                p class="muted suggestions-empty" { "No matching addresses" }
            }
        } @else {
            ul class="suggestions" role="listbox" {
                @for s in suggestions {
                    li role="option" {
                        button
                            type="button"
                            class="suggestion"
                            data-lat=(s.latitude)
                            data-lon=(s.longitude)
                            data-label=(format_address(Some(&s.display_name)))
                            data-zip=[s.address.postcode.as_deref()]
                        {
                            strong { (format_address(Some(&s.display_name))) }
                            br;
                            small class="muted" { (s.display_name) }
                        }
                    }
                }
            }
        }
    }
}
