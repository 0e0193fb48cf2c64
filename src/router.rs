use crate::db::listings::{
    delete_listing, get_all_listings, get_listing, get_listings_by_status, insert_listing,
    search_listings_by_location, update_listing,
};
use crate::db::stats::get_statistics;
use crate::db::Database;
use crate::domain::filters::{filter_listings, SearchFilter};
use crate::domain::listing::{Coordinates, Listing, NewListing};
use crate::domain::map::{listings_to_markers, MapViewport};
use crate::domain::query::SearchParams;
use crate::domain::selection::{SelectionEvent, SelectionSync};
use crate::domain::validation::{FieldErrors, ListingForm};
use crate::errors::ServerError;
use crate::geocoding::{GeocodeError, Geocoder, DEFAULT_LOCATION_LABEL};
use crate::photos::{file_name_from_url, PhotoStore, PUBLIC_PREFIX};
use crate::responses::{
    bytes_response, html_response, html_status_response, json_error_response, json_response,
    redirect, ResultResp,
};
use crate::templates;
use crate::templates::components::{MapConfig, MarkerView};
use crate::templates::pages::{add_listing_page, home_page, stats_page, HomeVm};
use astra::Request;
use chrono::Utc;
use std::collections::HashMap;
use std::io::Read;
use tracing::{info, warn};
use url::form_urlencoded;

const MAX_FORM_BYTES: usize = 64 * 1024;

/// Everything a request handler can reach. Shared read-only by all workers.
pub struct AppState {
    pub db: Database,
    pub geocoder: Geocoder,
    pub photos: PhotoStore,
}

pub fn handle(mut req: Request, app: &AppState) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let query = parse_query(&req);

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => home(app, req.uri().query()),
        ("GET", "/stats") => html_response(stats_page(&get_statistics(&app.db)?)),

        ("GET", "/listings/new") => html_response(add_listing_page(
            &ListingForm {
                status: "lost".to_string(),
                ..ListingForm::default()
            },
            &FieldErrors::default(),
        )),
        ("POST", "/listings") => {
            let body = read_body(&mut req, MAX_FORM_BYTES)?;
            create_listing(app, &body)
        }

        ("GET", "/geocode/suggest") => {
            let q = query
                .get("q")
                .or_else(|| query.get("location_name"))
                .map(String::as_str)
                .unwrap_or("");
            html_response(templates::suggestion_list(q, &app.geocoder.suggest(q)))
        }

        ("POST", "/photos") => {
            upload_photo(app, &mut req, &query).or_else(|e| json_error_response(&e))
        }

        ("GET", "/api/listings") => {
            api_listings(app, req.uri().query()).or_else(|e| json_error_response(&e))
        }
        ("GET", "/api/geocode") => {
            let q = query.get("q").map(String::as_str).unwrap_or("");
            app.geocoder
                .geocode(q)
                .map_err(ServerError::from)
                .and_then(|r| json_response(200, &r))
                .or_else(|e| json_error_response(&e))
        }
        ("GET", "/api/geocode/suggest") => {
            let q = query.get("q").map(String::as_str).unwrap_or("");
            json_response(200, &app.geocoder.suggest(q))
        }

        (_, p) if p.starts_with("/api/listings/") => {
            let result = match p["/api/listings/".len()..].parse::<i64>() {
                Ok(id) => api_listing(app, &method, id, &mut req),
                Err(_) => Err(ServerError::NotFound),
            };
            result.or_else(|e| json_error_response(&e))
        }

        ("GET", p) if p.starts_with("/uploads/") => serve_upload(app, &p["/uploads/".len()..]),
        ("GET", p) if p.starts_with("/static/") => serve_static(&p["/static/".len()..]),

        _ => Err(ServerError::NotFound),
    }
}

fn home(app: &AppState, raw_query: Option<&str>) -> ResultResp {
    let params = SearchParams::from_query(raw_query);
    let now = Utc::now();

    let (place, search_error) = match params.place_query() {
        None => (None, None),
        Some(q) => match app.geocoder.geocode(q) {
            Ok(place) => (Some(place), None),
            Err(e) => (None, Some(search_error_message(&e))),
        },
    };
    let center = place
        .as_ref()
        .map(|p| Coordinates::new(p.latitude, p.longitude));

    let listings = find_listings(&app.db, &params.to_filter(center))?;

    // Selection is resolved against the filtered list: an id that is not
    // among the results stays pending and no panel is shown.
    let mut selection = SelectionSync::new();
    if let Some(id) = params.selected {
        selection.apply(SelectionEvent::CardClicked(id));
    }
    let commands = selection.apply(SelectionEvent::ListingsLoaded(listings));

    let mut viewport = center
        .map(MapViewport::centered_on)
        .unwrap_or_default();
    let popup = viewport.apply(&commands);

    let markers = listings_to_markers(selection.listings())
        .into_iter()
        .map(|marker| MarkerView {
            href: params.href_selecting(marker.id),
            marker,
        })
        .collect();

    let vm = HomeVm {
        params: &params,
        selection: &selection,
        map: MapConfig::new(
            viewport,
            place
                .map(|p| p.display_name)
                .unwrap_or_else(|| DEFAULT_LOCATION_LABEL.to_string()),
            markers,
            popup,
        ),
        search_error,
        now,
    };

    html_response(home_page(&vm))
}

/// Narrows in SQL where a query exists for it, then applies the full filter.
fn find_listings(db: &Database, filter: &SearchFilter) -> Result<Vec<Listing>, ServerError> {
    let candidates = match (filter.center, filter.radius_km, filter.status) {
        (Some(center), Some(radius), _) => search_listings_by_location(db, center, radius)?,
        (_, _, Some(status)) => get_listings_by_status(db, status)?,
        _ => get_all_listings(db)?,
    };
    Ok(filter_listings(candidates, filter))
}

fn search_error_message(err: &GeocodeError) -> String {
    match err {
        GeocodeError::Network(_) | GeocodeError::Decode(_) => {
            warn!(error = %err, "location search unavailable");
            "Location search is unavailable right now. Please try again.".to_string()
        }
        other => other.to_string(),
    }
}

fn create_listing(app: &AppState, body: &[u8]) -> ResultResp {
    let form = ListingForm::from_pairs(
        form_urlencoded::parse(body).map(|(k, v)| (k.into_owned(), v.into_owned())),
    );

    match form.validate() {
        Ok(new) => {
            let listing = insert_listing(&app.db, &new, Utc::now())?;
            redirect(&format!("/?selected={}", listing.id))
        }
        Err(errors) => {
            info!(errors = errors.len(), "listing form rejected");
            html_status_response(422, add_listing_page(&form, &errors))
        }
    }
}

fn upload_photo(
    app: &AppState,
    req: &mut Request,
    query: &HashMap<String, String>,
) -> ResultResp {
    let content_type = req
        .headers()
        .get("Content-Type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    let name = query.get("name").map(String::as_str).unwrap_or("");

    let bytes = read_body(req, app.photos.max_bytes())?;
    let url = app.photos.upload(
        name,
        &content_type,
        &bytes,
        Utc::now().timestamp_millis(),
    )?;

    json_response(201, &serde_json::json!({ "url": url }))
}

fn api_listings(app: &AppState, raw_query: Option<&str>) -> ResultResp {
    let params = SearchParams::from_query(raw_query);

    let center = match (params.place_query(), params.radius_km()) {
        (Some(q), Some(_)) => {
            let place = app.geocoder.geocode(q)?;
            Some(Coordinates::new(place.latitude, place.longitude))
        }
        _ => None,
    };

    let listings = find_listings(&app.db, &params.to_filter(center))?;
    json_response(200, &listings)
}

fn api_listing(app: &AppState, method: &str, id: i64, req: &mut Request) -> ResultResp {
    match method {
        "GET" => {
            let listing = get_listing(&app.db, id)?.ok_or(ServerError::NotFound)?;
            json_response(200, &listing)
        }
        "PUT" => {
            let body = read_body(req, MAX_FORM_BYTES)?;
            let new: NewListing = serde_json::from_slice(&body)
                .map_err(|e| ServerError::BadRequest(format!("Invalid listing JSON: {e}")))?;

            let new = match ListingForm::from(&new).validate() {
                Ok(valid) => valid,
                Err(errors) => return json_response(422, &errors_json(&errors)),
            };

            let listing = update_listing(&app.db, id, &new)?.ok_or(ServerError::NotFound)?;
            json_response(200, &listing)
        }
        "DELETE" => {
            let listing = get_listing(&app.db, id)?.ok_or(ServerError::NotFound)?;
            delete_listing(&app.db, id)?;

            for url in listing.photos.iter().filter(|u| u.starts_with(PUBLIC_PREFIX)) {
                if let Err(e) = app.photos.delete(file_name_from_url(url)) {
                    warn!(url = %url, error = %e, "photo cleanup failed");
                }
            }
            json_response(200, &serde_json::json!({ "deleted": id }))
        }
        _ => Err(ServerError::NotFound),
    }
}

fn errors_json(errors: &FieldErrors) -> serde_json::Value {
    let fields: serde_json::Map<String, serde_json::Value> = errors
        .iter()
        .map(|(field, msg)| (field.to_string(), serde_json::Value::from(msg)))
        .collect();
    serde_json::json!({ "errors": fields })
}

fn serve_upload(app: &AppState, name: &str) -> ResultResp {
    let (bytes, mime) = app.photos.open(name)?.ok_or(ServerError::NotFound)?;
    bytes_response(mime.as_ref(), bytes, "public, max-age=86400")
}

fn serve_static(name: &str) -> ResultResp {
    match name {
        "map.js" => bytes_response(
            "application/javascript; charset=utf-8",
            include_str!("../static/map.js"),
            "public, max-age=3600",
        ),
        "main.css" => bytes_response(
            "text/css; charset=utf-8",
            include_str!("../static/main.css"),
            "public, max-age=3600",
        ),
        _ => Err(ServerError::NotFound),
    }
}

fn read_body(req: &mut Request, limit: usize) -> Result<Vec<u8>, ServerError> {
    let mut buf = Vec::new();
    req.body_mut()
        .reader()
        .take(limit as u64 + 1)
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("Failed to read body: {e}")))?;

    if buf.len() > limit {
        return Err(ServerError::Upload(format!(
            "Request body is larger than {limit} bytes"
        )));
    }
    Ok(buf)
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}
