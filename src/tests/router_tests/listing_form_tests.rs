use crate::db::listings::{get_all_listings, get_listing};
use crate::domain::listing::{ContactPreference, ListingStatus};
use crate::tests::utils::{body_string, test_app};
use scraper::{Html, Selector};

fn sel(s: &str) -> Selector {
    Selector::parse(s).unwrap()
}

fn valid_form() -> Vec<(&'static str, &'static str)> {
    vec![
        ("status", "lost"),
        ("name", "Biscuit"),
        ("species", "dog"),
        ("breed", "Beagle"),
        ("description", "Red collar, very friendly"),
        ("last_seen_at", "2024-05-01T18:30"),
        ("location_name", "Delaware Park, Buffalo"),
        ("latitude", "42.9301"),
        ("longitude", "-78.8653"),
        ("zipcode", "14216"),
        ("contact_name", "Sam Rivera"),
        ("contact_email", "sam@example.com"),
        ("contact_phone", "7165550101"),
        ("photos", "/uploads/pet_1_a.jpg"),
        ("photos", "/uploads/pet_1_b.jpg"),
    ]
}

fn without(form: &[(&'static str, &'static str)], keys: &[&str]) -> Vec<(&'static str, &'static str)> {
    form.iter()
        .filter(|(k, _)| !keys.contains(k))
        .copied()
        .collect()
}

#[test]
fn new_listing_form_has_autocomplete_and_upload() {
    let t = test_app("form_new");
    let resp = t.get("/listings/new");
    assert_eq!(resp.status(), 200);
    let doc = Html::parse_document(&body_string(resp));

    let input = doc.select(&sel("input#location_name")).next().unwrap();
    assert_eq!(input.value().attr("hx-get"), Some("/geocode/suggest"));
    assert_eq!(input.value().attr("hx-trigger"), Some("keyup changed delay:300ms"));

    assert_eq!(doc.select(&sel("input#photo-input[type=file]")).count(), 1);
    assert_eq!(doc.select(&sel("input[type=hidden][name=latitude]")).count(), 1);
    assert_eq!(doc.select(&sel("input[name=status][value=lost][checked]")).count(), 1);
    assert_eq!(doc.select(&sel("p.field-error[role=alert]")).count(), 0);
}

#[test]
fn valid_submission_is_stored_and_redirects_to_it() {
    let t = test_app("form_valid");

    let resp = t.post_form("/listings", &valid_form());
    assert_eq!(resp.status(), 303);

    let all = get_all_listings(&t.app.db).unwrap();
    assert_eq!(all.len(), 1);
    let stored = &all[0];
    assert_eq!(
        resp.headers().get("Location").unwrap(),
        format!("/?selected={}", stored.id).as_str()
    );

    let stored = get_listing(&t.app.db, stored.id).unwrap().unwrap();
    assert_eq!(stored.name, "Biscuit");
    assert_eq!(stored.status, ListingStatus::Lost);
    assert_eq!(stored.photos.len(), 2);
    assert_eq!(stored.contact.preferred(), Some(ContactPreference::Both));
    assert_eq!(stored.zipcode.as_deref(), Some("14216"));
}

#[test]
fn empty_name_and_no_contact_gives_exactly_two_errors_and_no_write() {
    let t = test_app("form_two_errors");
    let mut form = without(&valid_form(), &["contact_email", "contact_phone", "name"]);
    form.push(("name", ""));

    let resp = t.post_form("/listings", &form);
    assert_eq!(resp.status(), 422);
    let doc = Html::parse_document(&body_string(resp));

    let errors: Vec<String> = doc
        .select(&sel("p.field-error[role=alert]"))
        .map(|e| e.text().collect())
        .collect();
    assert_eq!(errors.len(), 2, "{errors:?}");
    assert!(errors.contains(&"Pet name is required".to_string()));
    assert!(errors.contains(&"At least one contact method (email or phone) is required".to_string()));

    assert!(get_all_listings(&t.app.db).unwrap().is_empty());
}

#[test]
fn rejected_form_keeps_what_was_typed() {
    let t = test_app("form_echo");
    let mut form = without(&valid_form(), &["contact_email"]);
    form.push(("contact_email", "not-an-email"));

    let resp = t.post_form("/listings", &form);
    assert_eq!(resp.status(), 422);
    let doc = Html::parse_document(&body_string(resp));

    let email = doc.select(&sel("input#contact_email")).next().unwrap();
    assert_eq!(email.value().attr("value"), Some("not-an-email"));
    let name = doc.select(&sel("input#name")).next().unwrap();
    assert_eq!(name.value().attr("value"), Some("Biscuit"));
    assert_eq!(doc.select(&sel("#photo-list input[name=photos]")).count(), 2);

    let err = doc.select(&sel(".has-error p.field-error")).next().unwrap();
    assert_eq!(err.text().collect::<String>(), "Please enter a valid email address");
}

#[test]
fn bad_zip_and_coordinates_are_field_errors() {
    let t = test_app("form_zip_coords");
    let mut form = without(&valid_form(), &["zipcode", "latitude"]);
    form.push(("zipcode", "142"));
    form.push(("latitude", "123.0"));

    let resp = t.post_form("/listings", &form);
    assert_eq!(resp.status(), 422);
    let body = body_string(resp);
    assert!(body.contains("ZIP code must be at least 5 digits"));
    assert!(body.contains("Please pick a location from the suggestions"));
    assert!(get_all_listings(&t.app.db).unwrap().is_empty());
}
