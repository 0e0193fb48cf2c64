use maud::{html, Markup};

use crate::domain::query::{SearchParams, RADIUS_CHOICES_KM};
use crate::templates::components::field_error;

const SPECIES: [&str; 5] = ["dog", "cat", "bird", "rabbit", "other"];

fn option(value: &str, label: &str, current: &str) -> Markup {
    html! {
        option value=(value) selected[current.eq_ignore_ascii_case(value)] { (label) }
    }
}

/// Location / ZIP / radius search plus the list filters.
///
/// Plain GET without JavaScript; with htmx the results are swapped in place
/// and the address bar is rewritten instead of navigating.
pub fn search_bar(params: &SearchParams, error: Option<&str>) -> Markup {
    html! {
        form
            class="search-bar"
            method="get"
            action="/"
            hx-get="/"
            hx-select="#app"
            hx-target="#app"
            hx-swap="outerHTML"
            hx-replace-url="true"
        {
            div class="field grow" {
                label for="location" { "Address or place" }
                input type="text" id="location" name="location" value=(params.location)
                    placeholder="e.g. Elmwood Ave, Buffalo";
            }
            div class="field" {
                label for="zip" { "ZIP" }
                input type="text" id="zip" name="zip" value=(params.zip)
                    inputmode="numeric" maxlength="10" placeholder="14222";
            }
            div class="field" {
                label for="radius" { "Within" }
                select id="radius" name="radius" {
                    (option("", "Any distance", &params.radius))
                    @for km in RADIUS_CHOICES_KM {
                        (option(&km.to_string(), &format!("{km} km"), &params.radius))
                    }
                }
            }
            div class="field" {
                label for="status" { "Status" }
                select id="status" name="status" {
                    (option("", "Lost & found", &params.status))
                    (option("lost", "Lost", &params.status))
                    (option("found", "Found", &params.status))
                }
            }
            div class="field" {
                label for="species" { "Species" }
                select id="species" name="species" {
                    (option("", "All", &params.species))
                    @for s in SPECIES {
                        (option(s, s, &params.species))
                    }
                }
            }
            div class="field grow" {
                label for="q" { "Keywords" }
                input type="search" id="q" name="q" value=(params.q) placeholder="collar, beagle…";
            }
            div class="field" {
                label for="from" { "Seen from" }
                input type="date" id="from" name="from" value=(params.from);
            }
            div class="field" {
                label for="to" { "to" }
                input type="date" id="to" name="to" value=(params.to);
            }
            button type="submit" class="primary" { "Search" }

            (field_error(error))
        }
    }
}
