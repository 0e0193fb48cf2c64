// src/domain/filters.rs
//
// Every predicate keeps the relative order of its input.

use chrono::{DateTime, Utc};

use crate::domain::listing::{Coordinates, Listing, ListingStatus};

pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Transient query state; built per request and dropped afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilter {
    pub status: Option<ListingStatus>,
    pub category: Option<String>,
    pub zipcode: Option<String>,
    pub date_range: Option<DateRange>,
    pub search_term: Option<String>,
    pub center: Option<Coordinates>,
    pub radius_km: Option<f64>,
}

impl SearchFilter {
    pub fn is_empty(&self) -> bool {
        *self == SearchFilter::default()
    }
}

/// Great-circle distance in kilometres (haversine).
pub fn calculate_distance(a: Coordinates, b: Coordinates) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

pub fn filter_by_status(listings: Vec<Listing>, status: ListingStatus) -> Vec<Listing> {
    listings.into_iter().filter(|l| l.status == status).collect()
}

/// Species match, ignoring case and surrounding whitespace.
pub fn filter_by_category(listings: Vec<Listing>, category: &str) -> Vec<Listing> {
    let category = category.trim();
    listings
        .into_iter()
        .filter(|l| l.category().trim().eq_ignore_ascii_case(category))
        .collect()
}

pub fn filter_by_zipcode(listings: Vec<Listing>, zipcode: &str) -> Vec<Listing> {
    listings
        .into_iter()
        .filter(|l| l.zipcode.as_deref() == Some(zipcode))
        .collect()
}

/// Inclusive on both ends, compared against `last_seen_at`.
pub fn filter_by_date_range(listings: Vec<Listing>, range: DateRange) -> Vec<Listing> {
    listings
        .into_iter()
        .filter(|l| l.last_seen_at >= range.start && l.last_seen_at <= range.end)
        .collect()
}

/// Case-insensitive substring match on title and description.
/// A blank term matches everything.
pub fn search_listings(listings: Vec<Listing>, term: &str) -> Vec<Listing> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return listings;
    }

    listings
        .into_iter()
        .filter(|l| {
            l.title().to_lowercase().contains(&term) || l.description.to_lowercase().contains(&term)
        })
        .collect()
}

/// Listings at most `radius_km` from `center`. Listings without coordinates
/// have no distance and are left out.
pub fn filter_by_radius(listings: Vec<Listing>, center: Coordinates, radius_km: f64) -> Vec<Listing> {
    listings
        .into_iter()
        .filter(|l| {
            l.coordinates
                .is_some_and(|pos| calculate_distance(center, pos) <= radius_km)
        })
        .collect()
}

/// status → category → zip → date range → free text → proximity.
pub fn filter_listings(listings: Vec<Listing>, filter: &SearchFilter) -> Vec<Listing> {
    let mut out = listings;

    if let Some(status) = filter.status {
        out = filter_by_status(out, status);
    }

    if let Some(category) = filter.category.as_deref() {
        out = filter_by_category(out, category);
    }

    if let Some(zipcode) = filter.zipcode.as_deref() {
        out = filter_by_zipcode(out, zipcode);
    }

    if let Some(range) = filter.date_range {
        out = filter_by_date_range(out, range);
    }

    if let Some(term) = filter.search_term.as_deref() {
        out = search_listings(out, term);
    }

    if let (Some(center), Some(radius)) = (filter.center, filter.radius_km) {
        out = filter_by_radius(out, center, radius);
    }

    out
}
