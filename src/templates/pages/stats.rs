use maud::{html, Markup};

use crate::db::stats::ListingStats;
use crate::templates::{components::card, desktop_layout};

fn count_table(heading: &str, rows: &[(String, i64)]) -> Markup {
    html! {
        @if rows.is_empty() {
            p class="muted" { "Nothing yet." }
        } @else {
            table {
                thead { tr { th { (heading) } th { "Listings" } } }
                tbody {
                    @for (key, n) in rows {
                        tr { td { (key) } td { (n) } }
                    }
                }
            }
        }
    }
}

pub fn stats_page(stats: &ListingStats) -> Markup {
    desktop_layout(
        "Statistics",
        html! {
            main class="container" {
                h1 { "Statistics" }

                div class="stat-grid" {
                    div class="stat" id="stat-total" { strong { (stats.total) } span { "Total" } }
                    div class="stat lost" id="stat-lost" { strong { (stats.lost) } span { "Lost" } }
                    div class="stat found" id="stat-found" { strong { (stats.found) } span { "Found" } }
                }

                (card("By species", count_table("Species", &stats.by_species)))
                (card("By ZIP code", count_table("ZIP", &stats.by_zipcode)))
            }
        },
    )
}
