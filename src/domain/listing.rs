use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::address::format_address;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Lost,
    Found,
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Lost => "lost",
            ListingStatus::Found => "found",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ListingStatus::Lost => "Lost",
            ListingStatus::Found => "Found",
        }
    }

    /// Red for lost pets, green for found ones.
    pub fn marker_color(&self) -> &'static str {
        match self {
            ListingStatus::Lost => "#ef4444",
            ListingStatus::Found => "#10b981",
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lost" => Ok(ListingStatus::Lost),
            "found" => Ok(ListingStatus::Found),
            other => Err(format!("unknown status: {other:?}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactPreference {
    Email,
    Phone,
    Both,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Contact {
    /// Derived from which channels are filled in.
    pub fn preferred(&self) -> Option<ContactPreference> {
        let email = self.email.as_deref().is_some_and(|e| !e.trim().is_empty());
        let phone = self.phone.as_deref().is_some_and(|p| !p.trim().is_empty());
        match (email, phone) {
            (true, true) => Some(ContactPreference::Both),
            (true, false) => Some(ContactPreference::Email),
            (false, true) => Some(ContactPreference::Phone),
            (false, false) => None,
        }
    }
}

/// Everything a submitted listing carries before the store assigns
/// `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewListing {
    pub status: ListingStatus,
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub photos: Vec<String>,
    pub last_seen_at: DateTime<Utc>,
    pub location_name: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub zipcode: Option<String>,
    pub contact: Contact,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    pub id: i64,
    pub status: ListingStatus,
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub description: String,
    pub photos: Vec<String>,
    pub last_seen_at: DateTime<Utc>,
    pub location_name: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub zipcode: Option<String>,
    pub created_at: DateTime<Utc>,
    pub contact: Contact,
}

impl Listing {
    pub fn from_new(id: i64, created_at: DateTime<Utc>, new: NewListing) -> Self {
        Self {
            id,
            status: new.status,
            name: new.name,
            species: new.species,
            breed: new.breed,
            color: new.color,
            size: new.size,
            age: new.age,
            gender: new.gender,
            description: new.description,
            photos: new.photos,
            last_seen_at: new.last_seen_at,
            location_name: new.location_name,
            coordinates: new.coordinates,
            zipcode: new.zipcode,
            created_at,
            contact: new.contact,
        }
    }

    pub fn title(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.species
    }

    pub fn cover_photo(&self) -> Option<&str> {
        self.photos.first().map(String::as_str)
    }

    /// Short location for cards and popups.
    pub fn location_label(&self) -> String {
        if let Some(name) = self.location_name.as_deref().filter(|n| !n.trim().is_empty()) {
            return format_address(Some(name));
        }
        if let Some(zip) = self.zipcode.as_deref().filter(|z| !z.trim().is_empty()) {
            return format!("ZIP: {zip}");
        }
        "Location unknown".to_string()
    }
}

/// "Today", "Yesterday", "3 days ago", then a calendar date after a week.
pub fn format_relative_date(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (now - at).num_days();
    match days {
        d if d <= 0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        d if d < 7 => format!("{d} days ago"),
        _ => at.format("%b %-d, %Y").to_string(),
    }
}
