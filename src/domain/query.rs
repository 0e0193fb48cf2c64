// src/domain/query.rs
use chrono::{DateTime, NaiveDate, Utc};
use url::form_urlencoded;

use crate::domain::filters::{DateRange, SearchFilter};
use crate::domain::listing::{Coordinates, ListingStatus};

pub const RADIUS_CHOICES_KM: [u32; 4] = [1, 5, 10, 25];

/// Raw home page query. Kept as text so the search bar can echo it back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchParams {
    pub zip: String,
    pub location: String,
    pub radius: String,
    pub status: String,
    pub species: String,
    pub q: String,
    pub from: String,
    pub to: String,
    pub selected: Option<i64>,
}

impl SearchParams {
    pub fn from_query(query: Option<&str>) -> Self {
        let mut params = SearchParams::default();
        let Some(query) = query else {
            return params;
        };

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let value = value.trim().to_string();
            match key.as_ref() {
                "zip" => params.zip = value,
                "location" => params.location = value,
                "radius" => params.radius = value,
                "status" => params.status = value,
                "species" => params.species = value,
                "q" => params.q = value,
                "from" => params.from = value,
                "to" => params.to = value,
                "selected" => params.selected = value.parse().ok(),
                _ => {}
            }
        }
        params
    }

    /// Text to geocode: the free-form location, else the ZIP.
    pub fn place_query(&self) -> Option<&str> {
        [self.location.as_str(), self.zip.as_str()]
            .into_iter()
            .find(|s| !s.is_empty())
    }

    pub fn radius_km(&self) -> Option<f64> {
        self.radius
            .parse::<f64>()
            .ok()
            .filter(|r| r.is_finite() && *r > 0.0)
    }

    /// Builds the listing filter. `center` is the geocoded place, if any.
    ///
    /// With a center and a radius the search is by proximity; otherwise a
    /// ZIP narrows by the listing's own ZIP.
    pub fn to_filter(&self, center: Option<Coordinates>) -> SearchFilter {
        let radius_km = self.radius_km();
        let proximity = center.is_some() && radius_km.is_some();

        SearchFilter {
            status: self.status.parse::<ListingStatus>().ok(),
            category: non_empty(&self.species)
                .filter(|s| !s.eq_ignore_ascii_case("all"))
                .map(str::to_string),
            zipcode: if proximity { None } else { non_empty(&self.zip).map(str::to_string) },
            date_range: self.date_range(),
            search_term: non_empty(&self.q).map(str::to_string),
            center: if proximity { center } else { None },
            radius_km: if proximity { radius_km } else { None },
        }
    }

    fn date_range(&self) -> Option<DateRange> {
        let start = parse_day(&self.from).and_then(|d| d.and_hms_opt(0, 0, 0));
        let end = parse_day(&self.to).and_then(|d| d.and_hms_opt(23, 59, 59));
        if start.is_none() && end.is_none() {
            return None;
        }
        Some(DateRange {
            start: start.map(|n| n.and_utc()).unwrap_or(DateTime::<Utc>::MIN_UTC),
            end: end.map(|n| n.and_utc()).unwrap_or(DateTime::<Utc>::MAX_UTC),
        })
    }

    /// Home page URL with these filters and `selected=<id>`.
    pub fn href_selecting(&self, id: i64) -> String {
        self.href(Some(id))
    }

    /// Home page URL with these filters and no selection.
    pub fn href_without_selection(&self) -> String {
        self.href(None)
    }

    fn href(&self, selected: Option<i64>) -> String {
        let mut ser = form_urlencoded::Serializer::new(String::new());
        for (key, value) in [
            ("zip", &self.zip),
            ("location", &self.location),
            ("radius", &self.radius),
            ("status", &self.status),
            ("species", &self.species),
            ("q", &self.q),
            ("from", &self.from),
            ("to", &self.to),
        ] {
            if !value.is_empty() {
                ser.append_pair(key, value);
            }
        }
        if let Some(id) = selected {
            ser.append_pair("selected", &id.to_string());
        }

        let query = ser.finish();
        if query.is_empty() {
            "/".to_string()
        } else {
            format!("/?{query}")
        }
    }
}

fn non_empty(v: &str) -> Option<&str> {
    let v = v.trim();
    (!v.is_empty()).then_some(v)
}

fn parse_day(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}
