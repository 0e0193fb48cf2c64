use crate::errors::ServerError;
use crate::tests::utils::{body_string, offline_app, test_app};
use http::Method;
use scraper::{Html, Selector};
use serde_json::Value;
use std::sync::atomic::Ordering;

fn json(t: &crate::tests::utils::TestApp, uri: &str) -> (u16, Value) {
    let resp = t.get(uri);
    let status = resp.status().as_u16();
    (status, serde_json::from_str(&body_string(resp)).unwrap())
}

#[test]
fn api_geocode_resolves_a_zip() {
    let t = test_app("geo_zip");
    let (status, body) = json(&t, "/api/geocode?q=14222");
    assert_eq!(status, 200);
    assert!((body["latitude"].as_f64().unwrap() - 42.9185).abs() < 1e-9);
    assert_eq!(body["address"]["postcode"], "14222");
}

#[test]
fn api_geocode_error_statuses() {
    let t = test_app("geo_errors");

    let (status, body) = json(&t, "/api/geocode?q=1234");
    assert_eq!(status, 400);
    assert_eq!(body["error"], "ZIP code must be at least 5 digits");

    let (status, _) = json(&t, "/api/geocode?q=");
    assert_eq!(status, 400);

    let (status, body) = json(&t, "/api/geocode?q=Atlantis");
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Address or ZIP code not found");

    let offline = offline_app("geo_errors_offline");
    let (status, _) = json(&offline, "/api/geocode?q=Niagara+Square");
    assert_eq!(status, 502);
}

#[test]
fn suggest_fragment_lists_matches() {
    let t = test_app("geo_suggest");
    let resp = t.get("/geocode/suggest?location_name=Niagara");
    assert_eq!(resp.status(), 200);
    let doc = Html::parse_document(&body_string(resp));

    let buttons: Vec<_> = doc
        .select(&Selector::parse("button.suggestion").unwrap())
        .collect();
    assert_eq!(buttons.len(), 1);
    assert_eq!(buttons[0].value().attr("data-lat"), Some("42.8864"));
    assert_eq!(buttons[0].value().attr("data-zip"), Some("14202"));
    assert_eq!(
        buttons[0].value().attr("data-label"),
        Some("Niagara Square, Downtown, Buffalo")
    );
}

#[test]
fn short_input_makes_no_request() {
    let t = test_app("geo_short");
    let body = body_string(t.get("/geocode/suggest?q=ni"));
    assert!(!body.contains("suggestion"));
    assert_eq!(t.geocoder_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn no_matches_says_so() {
    let t = test_app("geo_none");
    let body = body_string(t.get("/geocode/suggest?q=Atlantis"));
    assert!(body.contains("No matching addresses"));
}

#[test]
fn outage_falls_back_to_known_addresses() {
    let t = offline_app("geo_fallback");

    let (status, body) = json(&t, "/api/geocode/suggest?q=Elmwood");
    assert_eq!(status, 200);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["display_name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 3);
    assert!(names[0].starts_with("Delaware Park"));
}

#[test]
fn unknown_route_is_not_found() {
    let t = test_app("geo_404");
    let result = t.request(Method::GET, "/nope", "text/plain", Vec::new());
    assert!(matches!(result, Err(ServerError::NotFound)));
}
