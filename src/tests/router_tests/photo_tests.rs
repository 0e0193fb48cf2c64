use crate::errors::ServerError;
use crate::tests::utils::{body_bytes, body_string, test_app};
use http::Method;
use serde_json::Value;

#[test]
fn uploaded_photo_is_served_back() {
    let t = test_app("photo_roundtrip");

    let resp = t
        .request(Method::POST, "/photos?name=Biscuit.png", "image/png", b"\x89PNG-fake".to_vec())
        .unwrap();
    assert_eq!(resp.status(), 201);
    let body: Value = serde_json::from_str(&body_string(resp)).unwrap();
    let url = body["url"].as_str().unwrap();
    assert!(url.starts_with("/uploads/pet_"));
    assert!(url.ends_with(".png"));

    let served = t.get(url);
    assert_eq!(served.status(), 200);
    assert_eq!(served.headers().get("Content-Type").unwrap(), "image/png");
    assert_eq!(body_bytes(served), b"\x89PNG-fake");
}

#[test]
fn non_image_and_oversized_uploads_are_rejected() {
    let t = test_app("photo_reject");

    let resp = t
        .request(Method::POST, "/photos?name=notes.txt", "text/plain", b"hello".to_vec())
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = serde_json::from_str(&body_string(resp)).unwrap();
    assert_eq!(body["error"], "Only image uploads are accepted");

    // test apps allow 1 KiB
    let resp = t
        .request(Method::POST, "/photos?name=big.jpg", "image/jpeg", vec![0u8; 2048])
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[test]
fn missing_or_unsafe_upload_names_are_not_found() {
    let t = test_app("photo_missing");
    for uri in ["/uploads/pet_1_none.png", "/uploads/..%2Fsecret"] {
        let result = t.request(Method::GET, uri, "text/plain", Vec::new());
        assert!(matches!(result, Err(ServerError::NotFound)), "{uri}");
    }
}

#[test]
fn static_assets_are_bundled() {
    let t = test_app("static_assets");

    let js = t.get("/static/map.js");
    assert_eq!(js.status(), 200);
    assert!(body_string(js).contains("L.map"));

    let css = t.get("/static/main.css");
    assert_eq!(css.headers().get("Content-Type").unwrap(), "text/css; charset=utf-8");

    let result = t.request(Method::GET, "/static/app.wasm", "text/plain", Vec::new());
    assert!(matches!(result, Err(ServerError::NotFound)));
}
