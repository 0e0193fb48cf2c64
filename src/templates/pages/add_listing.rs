// templates/pages/add_listing.rs

use maud::{html, Markup};

use crate::domain::validation::{FieldErrors, ListingForm};
use crate::templates::{components::field_error, desktop_layout};

const SPECIES: [&str; 5] = ["dog", "cat", "bird", "rabbit", "other"];

fn field_class(base: &str, errors: &FieldErrors, name: &str) -> String {
    if errors.get(name).is_some() {
        format!("{base} has-error")
    } else {
        base.to_string()
    }
}

fn text_field(
    name: &'static str,
    label: &str,
    value: &str,
    errors: &FieldErrors,
    input_type: &str,
    required: bool,
) -> Markup {
    html! {
        div class=(field_class("field", errors, name)) {
            label for=(name) { (label) @if required { " *" } }
            input type=(input_type) id=(name) name=(name) value=(value) required[required];
            (field_error(errors.get(name)))
        }
    }
}

/// The add-listing form, blank or re-rendered with the submitted values and
/// their errors.
pub fn add_listing_page(form: &ListingForm, errors: &FieldErrors) -> Markup {
    desktop_layout(
        "Add a listing",
        html! {
            main class="container" {
                h1 { "Report a lost or found pet" }

                @if !errors.is_empty() {
                    div class="form-summary" role="alert" {
                        "Please fix the " (errors.len()) " highlighted "
                        @if errors.len() == 1 { "field" } @else { "fields" }
                        "."
                    }
                }

                form id="listing-form" class="listing-form" method="post" action="/listings" {
                    fieldset {
                        legend { "Status *" }
                        @for (value, label) in [("lost", "I lost a pet"), ("found", "I found a pet")] {
                            label class="radio" {
                                input type="radio" name="status" value=(value)
                                    checked[form.status == value];
                                " " (label)
                            }
                        }
                        (field_error(errors.get("status")))
                    }

                    section class="card" {
                        h3 { "The pet" }
                        (text_field("name", "Name", &form.name, errors, "text", true))

                        div class=(field_class("field", errors, "species")) {
                            label for="species" { "Species *" }
                            select id="species" name="species" required {
                                option value="" { "Choose…" }
                                @for s in SPECIES {
                                    option value=(s) selected[form.species == s] { (s) }
                                }
                            }
                            (field_error(errors.get("species")))
                        }

                        (text_field("breed", "Breed", &form.breed, errors, "text", false))
                        (text_field("color", "Color", &form.color, errors, "text", false))
                        (text_field("size", "Size", &form.size, errors, "text", false))
                        (text_field("age", "Age", &form.age, errors, "text", false))
                        (text_field("gender", "Gender", &form.gender, errors, "text", false))

                        div class="field" {
                            label for="description" { "Description" }
                            textarea id="description" name="description" rows="4" { (form.description) }
                        }
                    }

                    section class="card" {
                        h3 { "Where and when" }
                        (text_field("last_seen_at", "Last seen", &form.last_seen_at, errors, "datetime-local", true))

                        div class=(field_class("field autocomplete", errors, "location_name")) {
                            label for="location_name" { "Location *" }
                            input
                                type="text"
                                id="location_name"
                                name="location_name"
                                value=(form.location_name)
                                autocomplete="off"
                                placeholder="Start typing an address"
                                hx-get="/geocode/suggest"
                                hx-trigger="keyup changed delay:300ms"
                                hx-target="#suggestions"
                                hx-swap="innerHTML";
                            div id="suggestions" {}
                            (field_error(errors.get("location_name")))
                            (field_error(errors.get("coordinates")))
                        }

                        input type="hidden" id="latitude" name="latitude" value=(form.latitude);
                        input type="hidden" id="longitude" name="longitude" value=(form.longitude);
                        (text_field("zipcode", "ZIP code", &form.zipcode, errors, "text", false))
                    }

                    section class="card" {
                        h3 { "Photos" }
                        div class="field" {
                            label for="photo-input" { "Add photos" }
                            input type="file" id="photo-input" accept="image/*" multiple;
                            p class="field-error" id="photo-error" hidden {}
                        }
                        div id="photo-list" class="photo-list" {
                            @for url in &form.photos {
                                figure {
                                    img src=(url) alt="Uploaded photo";
                                    input type="hidden" name="photos" value=(url);
                                }
                            }
                        }
                    }

                    section class="card" {
                        h3 { "Contact" }
                        (text_field("contact_name", "Your name", &form.contact_name, errors, "text", true))
                        (text_field("contact_email", "Email", &form.contact_email, errors, "email", false))
                        (text_field("contact_phone", "Phone", &form.contact_phone, errors, "tel", false))
                        (field_error(errors.get("contact")))
                    }

                    button type="submit" class="primary" { "Post listing" }
                }
            }
        },
    )
}
