use regex::Regex;
use std::sync::OnceLock;

use crate::domain::listing::Coordinates;

fn zipcode_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{5}(-\d{4})?$").expect("static regex"))
}

/// US ZIP or ZIP+4, surrounding whitespace ignored.
pub fn is_valid_zipcode(zipcode: &str) -> bool {
    zipcode_re().is_match(zipcode.trim())
}

/// Message explaining why a ZIP code is unusable.
/// Blank input is not an error: the field is optional.
pub fn zipcode_validation_error(zipcode: &str) -> Option<&'static str> {
    let trimmed = zipcode.trim();
    if trimmed.is_empty() {
        return None;
    }

    if !trimmed.chars().all(|c| c.is_ascii_digit() || c == '-') {
        return Some("ZIP code must contain only numbers and hyphens");
    }

    if trimmed.len() < 5 {
        return Some("ZIP code must be at least 5 digits");
    }

    if trimmed.len() > 10 {
        return Some("ZIP code cannot exceed 10 characters");
    }

    if !is_valid_zipcode(trimmed) {
        return Some("Please enter a valid US ZIP code (e.g., 10024 or 10024-1234)");
    }

    None
}

/// Anything shorter than three characters is too vague to geocode.
pub fn is_valid_address(address: &str) -> bool {
    address.trim().chars().count() >= 3
}

/// Inputs made only of digits and hyphens are treated as postal codes.
pub fn looks_like_zipcode(query: &str) -> bool {
    let trimmed = query.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit() || c == '-')
}

pub const DEFAULT_LOCATION_LABEL: &str = "Buffalo, NY";

/// Downtown Buffalo, NY.
pub fn default_location() -> Coordinates {
    Coordinates::new(42.8864, -78.8784)
}
