// templates/components/listing.rs
use chrono::{DateTime, Utc};
use maud::{html, Markup};

use crate::domain::listing::{format_relative_date, ContactPreference, Listing, ListingStatus};

fn status_badge(status: ListingStatus) -> Markup {
    html! {
        span class={ "badge badge-" (status.as_str()) } { (status.label()) }
    }
}

fn photo(listing: &Listing, class: &str) -> Markup {
    html! {
        @match listing.cover_photo() {
            Some(src) => {
                img class=(class) src=(src) alt=(listing.title()) loading="lazy";
            }
            None => {
                div class={ (class) " photo-placeholder" } aria-hidden="true" { "🐾" }
            }
        }
    }
}

/// One entry of the results list. Clicking selects the listing.
pub fn listing_card(listing: &Listing, href: &str, selected: bool, now: DateTime<Utc>) -> Markup {
    html! {
        a
            class=(if selected { "listing-card selected" } else { "listing-card" })
            href=(href)
            data-listing-id=(listing.id)
        {
            (photo(listing, "card-photo"))
            div class="card-body" {
                (status_badge(listing.status))
                h3 { (listing.title()) }
                p class="muted" { (listing.category()) }
                p class="location" { (listing.location_label()) }
                p class="seen" { "Last seen " (format_relative_date(listing.last_seen_at, now)) }
            }
        }
    }
}

fn detail_row(label: &str, value: Option<&str>) -> Markup {
    html! {
        @if let Some(v) = value.filter(|v| !v.trim().is_empty()) {
            tr { th { (label) } td { (v) } }
        }
    }
}

/// Side panel for the selected listing.
pub fn detail_panel(listing: &Listing, close_href: &str, now: DateTime<Utc>) -> Markup {
    let contact = &listing.contact;

    html! {
        aside class="detail-panel" id="detail-panel" data-listing-id=(listing.id) {
            a class="close" href=(close_href) aria-label="Close details" { "×" }

            @if listing.photos.is_empty() {
                (photo(listing, "detail-photo"))
            } @else {
                div class="gallery" {
                    @for src in &listing.photos {
                        img class="detail-photo" src=(src) alt=(listing.title());
                    }
                }
            }

            (status_badge(listing.status))
            h2 { (listing.title()) }

            table class="facts" {
                (detail_row("Species", Some(listing.category())))
                (detail_row("Breed", listing.breed.as_deref()))
                (detail_row("Color", listing.color.as_deref()))
                (detail_row("Size", listing.size.as_deref()))
                (detail_row("Age", listing.age.as_deref()))
                (detail_row("Gender", listing.gender.as_deref()))
                tr {
                    th { "Last seen" }
                    td {
                        (format_relative_date(listing.last_seen_at, now))
                        " · "
                        (listing.last_seen_at.format("%b %-d, %Y %H:%M"))
                    }
                }
                tr { th { "Where" } td { (listing.location_label()) } }
            }

            @if !listing.description.is_empty() {
                p class="description" { (listing.description) }
            }

            section class="contact" {
                h3 { "Contact " (contact.name) }
                @if let Some(email) = contact.email.as_deref() {
                    p { a href={ "mailto:" (email) } { (email) } }
                }
                @if let Some(phone) = contact.phone.as_deref() {
                    p { a href={ "tel:" (phone) } { (phone) } }
                }
                @match contact.preferred() {
                    Some(ContactPreference::Both) => p class="muted" { "Email or phone" },
                    Some(ContactPreference::Email) => p class="muted" { "Prefers email" },
                    Some(ContactPreference::Phone) => p class="muted" { "Prefers phone" },
                    None => {},
                }
            }
        }
    }
}
