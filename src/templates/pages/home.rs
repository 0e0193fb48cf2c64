// templates/pages/home.rs

use chrono::{DateTime, Utc};
use maud::{html, Markup};

use crate::domain::query::SearchParams;
use crate::domain::selection::{SelectionSync, ViewMode};
use crate::templates::{
    components::{detail_panel, listing_card, map_view, search_bar, MapConfig},
    desktop_layout,
};

pub struct HomeVm<'a> {
    pub params: &'a SearchParams,
    pub selection: &'a SelectionSync,
    pub map: MapConfig,
    pub search_error: Option<String>,
    pub now: DateTime<Utc>,
}

pub fn home_page(vm: &HomeVm) -> Markup {
    let listings = vm.selection.listings();
    let selected = vm.selection.selected_id();

    desktop_layout(
        "Lost & found pets",
        html! {
            main id="app" class="home" {
                (search_bar(vm.params, vm.search_error.as_deref()))

                div class="results" {
                    section class="listing-list" {
                        p class="muted result-count" {
                            (listings.len()) @if listings.len() == 1 { " listing" } @else { " listings" }
                        }
                        @if listings.is_empty() {
                            p class="empty" { "No pets match this search yet." }
                        }
                        @for listing in listings {
                            (listing_card(
                                listing,
                                &vm.params.href_selecting(listing.id),
                                selected == Some(listing.id),
                                vm.now,
                            ))
                        }
                    }

                    @if vm.selection.view_mode() == ViewMode::DetailView {
                        @if let Some(listing) = vm.selection.selected_listing() {
                            (detail_panel(listing, &vm.params.href_without_selection(), vm.now))
                        }
                    }

                    (map_view(&vm.map))
                }
            }
        },
    )
}
