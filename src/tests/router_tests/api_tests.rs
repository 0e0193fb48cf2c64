use crate::db::listings::get_listing;
use crate::domain::listing::ListingStatus;
use crate::tests::utils::{body_string, listing, test_app, NIAGARA_SQUARE};
use http::Method;
use serde_json::Value;

fn parse(resp: astra::Response) -> (u16, Value) {
    let status = resp.status().as_u16();
    (status, serde_json::from_str(&body_string(resp)).unwrap())
}

#[test]
fn list_endpoint_applies_filters() {
    let t = test_app("api_list");
    t.insert(&listing("Biscuit", ListingStatus::Lost, Some(NIAGARA_SQUARE)));
    t.insert(&listing("Pepper", ListingStatus::Found, Some((43.0962, -79.0377))));

    let (status, all) = parse(t.get("/api/listings"));
    assert_eq!(status, 200);
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (_, lost) = parse(t.get("/api/listings?status=lost"));
    assert_eq!(lost.as_array().unwrap().len(), 1);
    assert_eq!(lost[0]["name"], "Biscuit");
    assert_eq!(lost[0]["status"], "lost");

    let (_, near) = parse(t.get("/api/listings?location=Niagara+Square&radius=5"));
    assert_eq!(near.as_array().unwrap().len(), 1);
    assert_eq!(near[0]["name"], "Biscuit");
}

#[test]
fn species_filter_ignores_case_of_stored_listing() {
    let t = test_app("api_species_case");
    let mut pet = listing("Biscuit", ListingStatus::Lost, None);
    pet.species = "Dog".to_string();
    t.insert(&pet);
    t.insert(&listing("Rex", ListingStatus::Found, None));

    for query in ["species=Dog", "species=dog", "species=DOG"] {
        let (status, body) = parse(t.get(&format!("/api/listings?{query}")));
        assert_eq!(status, 200);
        assert_eq!(body.as_array().unwrap().len(), 2, "{query}");
    }

    let (_, cats) = parse(t.get("/api/listings?species=cat"));
    assert!(cats.as_array().unwrap().is_empty());
}

#[test]
fn get_one_and_missing() {
    let t = test_app("api_get");
    let pet = t.insert(&listing("Biscuit", ListingStatus::Lost, None));

    let (status, body) = parse(t.get(&format!("/api/listings/{}", pet.id)));
    assert_eq!(status, 200);
    assert_eq!(body["id"], pet.id);
    assert_eq!(body["contact"]["email"], "sam@example.com");

    let (status, body) = parse(t.get("/api/listings/4242"));
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Not Found");

    let (status, _) = parse(t.get("/api/listings/abc"));
    assert_eq!(status, 404);
}

#[test]
fn put_updates_a_valid_listing() {
    let t = test_app("api_put");
    let pet = t.insert(&listing("Biscuit", ListingStatus::Lost, None));

    let mut changed = listing("Biscuit", ListingStatus::Found, Some(NIAGARA_SQUARE));
    changed.description = "Reunited soon".to_string();
    let body = serde_json::to_vec(&changed).unwrap();

    let (status, json) = parse(
        t.request(Method::PUT, &format!("/api/listings/{}", pet.id), "application/json", body)
            .unwrap(),
    );
    assert_eq!(status, 200);
    assert_eq!(json["status"], "found");

    let stored = get_listing(&t.app.db, pet.id).unwrap().unwrap();
    assert_eq!(stored.status, ListingStatus::Found);
    assert_eq!(stored.description, "Reunited soon");
}

#[test]
fn put_rejects_listing_without_contact() {
    let t = test_app("api_put_invalid");
    let pet = t.insert(&listing("Biscuit", ListingStatus::Lost, None));

    let mut broken = listing("Biscuit", ListingStatus::Lost, None);
    broken.contact.email = None;
    broken.contact.phone = None;

    let (status, json) = parse(
        t.request(
            Method::PUT,
            &format!("/api/listings/{}", pet.id),
            "application/json",
            serde_json::to_vec(&broken).unwrap(),
        )
        .unwrap(),
    );
    assert_eq!(status, 422);
    assert!(json["errors"]["contact"].is_string());
    assert_eq!(
        get_listing(&t.app.db, pet.id).unwrap().unwrap().contact.email.as_deref(),
        Some("sam@example.com")
    );

    let (status, _) = parse(
        t.request(
            Method::PUT,
            &format!("/api/listings/{}", pet.id),
            "application/json",
            b"{not json".to_vec(),
        )
        .unwrap(),
    );
    assert_eq!(status, 400);
}

#[test]
fn delete_removes_listing_and_its_photos() {
    let t = test_app("api_delete");

    let (_, uploaded) = parse(
        t.request(Method::POST, "/photos?name=dog.png", "image/png", b"png-bytes".to_vec())
            .unwrap(),
    );
    let url = uploaded["url"].as_str().unwrap().to_string();

    let mut new = listing("Biscuit", ListingStatus::Lost, None);
    new.photos = vec![url.clone()];
    let pet = t.insert(&new);

    let (status, body) = parse(
        t.request(Method::DELETE, &format!("/api/listings/{}", pet.id), "application/json", Vec::new())
            .unwrap(),
    );
    assert_eq!(status, 200);
    assert_eq!(body["deleted"], pet.id);
    assert!(get_listing(&t.app.db, pet.id).unwrap().is_none());

    let gone = t.request(Method::GET, &url, "text/plain", Vec::new());
    assert!(gone.is_err());

    let (status, _) = parse(
        t.request(Method::DELETE, &format!("/api/listings/{}", pet.id), "application/json", Vec::new())
            .unwrap(),
    );
    assert_eq!(status, 404);
}
