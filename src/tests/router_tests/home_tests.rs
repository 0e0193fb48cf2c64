use crate::domain::listing::ListingStatus;
use crate::tests::utils::{body_string, listing, offline_app, test_app, NIAGARA_SQUARE};
use scraper::{Html, Selector};
use serde_json::Value;

fn sel(s: &str) -> Selector {
    Selector::parse(s).unwrap()
}

fn card_ids(doc: &Html) -> Vec<i64> {
    doc.select(&sel("a.listing-card"))
        .map(|a| a.value().attr("data-listing-id").unwrap().parse().unwrap())
        .collect()
}

fn map_config(doc: &Html) -> Value {
    let map = doc.select(&sel("#map")).next().expect("map present");
    serde_json::from_str(map.value().attr("data-config").unwrap()).unwrap()
}

#[test]
fn home_lists_every_listing_with_markers() {
    let t = test_app("home_all");
    let a = t.insert(&listing("Biscuit", ListingStatus::Lost, Some(NIAGARA_SQUARE)));
    let b = t.insert(&listing("Mittens", ListingStatus::Found, None));

    let resp = t.get("/");
    assert_eq!(resp.status(), 200);
    let doc = Html::parse_document(&body_string(resp));

    let mut ids = card_ids(&doc);
    ids.sort();
    assert_eq!(ids, vec![a.id, b.id]);
    assert_eq!(doc.select(&sel("#detail-panel")).count(), 0);

    let cfg = map_config(&doc);
    assert_eq!(cfg["zoom"], 13);
    assert_eq!(cfg["markers"].as_array().unwrap().len(), 1, "only located listings get markers");
    assert_eq!(cfg["markers"][0]["color"], "#ef4444");
    assert!(cfg["popup"].is_null());
    assert_eq!(cfg["markers"][0]["location"], "Niagara Square, Buffalo, NY");
    assert_eq!(t.geocoder_calls.load(std::sync::atomic::Ordering::SeqCst), 0);
}

#[test]
fn default_map_has_a_labelled_center_marker() {
    let t = test_app("home_center");
    let doc = Html::parse_document(&body_string(t.get("/")));

    let cfg = map_config(&doc);
    assert_eq!(cfg["center_label"], "Buffalo, NY");
    assert!((cfg["center"][0].as_f64().unwrap() - 42.8864).abs() < 1e-9);
    assert!((cfg["center"][1].as_f64().unwrap() + 78.8784).abs() < 1e-9);
}

#[test]
fn species_filter_matches_stored_case() {
    let t = test_app("home_species_case");
    let mut dog = listing("Biscuit", ListingStatus::Lost, None);
    dog.species = "Dog".to_string();
    let dog = t.insert(&dog);
    let mut cat = listing("Mittens", ListingStatus::Lost, None);
    cat.species = "cat".to_string();
    t.insert(&cat);

    for query in ["/?species=dog", "/?species=Dog"] {
        let doc = Html::parse_document(&body_string(t.get(query)));
        assert_eq!(card_ids(&doc), vec![dog.id], "{query}");
    }
}

#[test]
fn proximity_search_keeps_only_nearby_listings() {
    let t = test_app("home_radius");
    let near = t.insert(&listing("Near", ListingStatus::Lost, Some((42.8870, -78.8790))));
    t.insert(&listing("Far", ListingStatus::Lost, Some((43.0962, -79.0377))));
    t.insert(&listing("Nowhere", ListingStatus::Lost, None));

    let doc = Html::parse_document(&body_string(
        t.get("/?location=Niagara+Square&radius=5"),
    ));

    assert_eq!(card_ids(&doc), vec![near.id]);

    let cfg = map_config(&doc);
    assert!((cfg["center"][0].as_f64().unwrap() - NIAGARA_SQUARE.0).abs() < 1e-9);
    assert!(cfg["center_label"].as_str().unwrap().starts_with("Niagara Square"));
}

#[test]
fn status_filter_and_keyword_search() {
    let t = test_app("home_filters");
    t.insert(&listing("Biscuit", ListingStatus::Lost, Some(NIAGARA_SQUARE)));
    let found = t.insert(&listing("Pepper", ListingStatus::Found, Some(NIAGARA_SQUARE)));

    let doc = Html::parse_document(&body_string(t.get("/?status=found")));
    assert_eq!(card_ids(&doc), vec![found.id]);

    let doc = Html::parse_document(&body_string(t.get("/?q=pepper")));
    assert_eq!(card_ids(&doc), vec![found.id]);

    let doc = Html::parse_document(&body_string(t.get("/?q=nobody")));
    assert!(card_ids(&doc).is_empty());
    assert_eq!(doc.select(&sel("p.empty")).count(), 1);
}

#[test]
fn selected_listing_opens_detail_and_popup() {
    let t = test_app("home_selected");
    let pet = t.insert(&listing("Biscuit", ListingStatus::Lost, Some((42.93, -78.86))));

    let doc = Html::parse_document(&body_string(t.get(&format!("/?q=biscuit&selected={}", pet.id))));

    let panel = doc.select(&sel("#detail-panel")).next().expect("detail panel");
    assert_eq!(panel.value().attr("data-listing-id"), Some(pet.id.to_string().as_str()));

    let close = doc.select(&sel("#detail-panel a.close")).next().unwrap();
    assert_eq!(close.value().attr("href"), Some("/?q=biscuit"));

    let cfg = map_config(&doc);
    assert_eq!(cfg["zoom"], 16);
    assert!((cfg["center"][0].as_f64().unwrap() - 42.93).abs() < 1e-9);
    assert_eq!(cfg["popup"]["listing_id"], pet.id);
    assert_eq!(cfg["popup"]["delay_ms"], 150);

    let selected_cards = doc.select(&sel("a.listing-card.selected")).count();
    assert_eq!(selected_cards, 1);
}

#[test]
fn stale_selected_id_renders_no_detail_panel() {
    let t = test_app("home_stale");
    t.insert(&listing("Biscuit", ListingStatus::Lost, Some(NIAGARA_SQUARE)));

    let resp = t.get("/?selected=9999");
    assert_eq!(resp.status(), 200);
    let doc = Html::parse_document(&body_string(resp));

    assert_eq!(doc.select(&sel("#detail-panel")).count(), 0);
    assert_eq!(card_ids(&doc).len(), 1);
    assert!(map_config(&doc)["popup"].is_null());
}

#[test]
fn selection_filtered_out_of_results_shows_no_panel() {
    let t = test_app("home_filtered_selection");
    let lost = t.insert(&listing("Biscuit", ListingStatus::Lost, Some(NIAGARA_SQUARE)));

    let doc = Html::parse_document(&body_string(
        t.get(&format!("/?status=found&selected={}", lost.id)),
    ));
    assert_eq!(doc.select(&sel("#detail-panel")).count(), 0);
}

#[test]
fn unknown_place_is_reported_inline() {
    let t = test_app("home_not_found");
    t.insert(&listing("Biscuit", ListingStatus::Lost, Some(NIAGARA_SQUARE)));

    let resp = t.get("/?location=Atlantis&radius=5");
    assert_eq!(resp.status(), 200);
    let doc = Html::parse_document(&body_string(resp));

    let err = doc.select(&sel(".search-bar .field-error")).next().unwrap();
    assert_eq!(err.text().collect::<String>(), "Address or ZIP code not found");
    // Without a center the radius is ignored and the list stays usable.
    assert_eq!(card_ids(&doc).len(), 1);
    assert_eq!(map_config(&doc)["zoom"], 13);
}

#[test]
fn malformed_zip_is_rejected_without_a_request() {
    let t = test_app("home_bad_zip");

    let doc = Html::parse_document(&body_string(t.get("/?zip=1234")));
    let err = doc.select(&sel(".search-bar .field-error")).next().unwrap();
    assert_eq!(err.text().collect::<String>(), "ZIP code must be at least 5 digits");
    assert_eq!(t.geocoder_calls.load(std::sync::atomic::Ordering::SeqCst), 0);
}

#[test]
fn geocoder_outage_leaves_page_usable() {
    let t = offline_app("home_offline");
    t.insert(&listing("Biscuit", ListingStatus::Lost, Some(NIAGARA_SQUARE)));

    let resp = t.get("/?location=Niagara+Square");
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("Location search is unavailable right now"));
    assert!(!body.contains("connection refused"));
    assert_eq!(card_ids(&Html::parse_document(&body)).len(), 1);
}

#[test]
fn stats_page_counts_listings() {
    let t = test_app("stats_page");
    t.insert(&listing("Biscuit", ListingStatus::Lost, None));
    t.insert(&listing("Pepper", ListingStatus::Lost, None));
    t.insert(&listing("Mittens", ListingStatus::Found, None));

    let doc = Html::parse_document(&body_string(t.get("/stats")));
    let value = |id: &str| {
        doc.select(&sel(&format!("#{id} strong")))
            .next()
            .unwrap()
            .text()
            .collect::<String>()
    };
    assert_eq!(value("stat-total"), "3");
    assert_eq!(value("stat-lost"), "2");
    assert_eq!(value("stat-found"), "1");
}
