// src/domain/address.rs

pub const UNKNOWN_LOCATION: &str = "Location unknown";

const MAX_SEGMENTS: usize = 3;
const QUALIFIER_WORDS: &[&str] = &["county", "park", "north", "south", "east", "west"];

/// Shortens a verbose geocoder address to at most three display segments.
///
/// "Wegmans, 601, Amherst Street, Buffalo, Erie County, New York, 14207, United States"
/// becomes "Wegmans, 601 Amherst Street, Buffalo".
///
/// Total: blank input gives [`UNKNOWN_LOCATION`], undecomposable input comes
/// back as its first raw segments or unchanged.
pub fn format_address(address: Option<&str>) -> String {
    let Some(raw) = address.filter(|a| !a.trim().is_empty()) else {
        return UNKNOWN_LOCATION.to_string();
    };

    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();

    let meaningful: Vec<String> = join_house_numbers(&parts)
        .into_iter()
        .filter(|s| is_meaningful(s))
        .take(MAX_SEGMENTS)
        .collect();
    if !meaningful.is_empty() {
        return meaningful.join(", ");
    }

    let leading: Vec<&str> = parts
        .iter()
        .copied()
        .filter(|p| !p.is_empty())
        .take(MAX_SEGMENTS)
        .collect();
    if !leading.is_empty() {
        return leading.join(", ");
    }

    raw.to_string()
}

/// Nominatim splits "601 Amherst Street" into "601", "Amherst Street".
fn join_house_numbers(parts: &[&str]) -> Vec<String> {
    let mut out = Vec::with_capacity(parts.len());
    let mut i = 0;

    while i < parts.len() {
        let part = parts[i];
        if part.is_empty() {
            i += 1;
            continue;
        }

        let next = parts.get(i + 1).copied().unwrap_or("");
        let is_number = part.chars().all(|c| c.is_ascii_digit());
        let next_is_street = next.chars().next().is_some_and(char::is_alphabetic) && is_meaningful(next);

        if is_number && next_is_street {
            out.push(format!("{part} {next}"));
            i += 2;
        } else {
            out.push(part.to_string());
            i += 1;
        }
    }

    out
}

fn is_meaningful(segment: &str) -> bool {
    let lower = segment.trim().to_lowercase();
    if lower.is_empty() || lower.contains("united states") || lower == "new york" {
        return false;
    }
    !lower
        .split_whitespace()
        .any(|word| QUALIFIER_WORDS.contains(&word))
}
