// src/domain/validation.rs
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::domain::listing::{Contact, Coordinates, ListingStatus, NewListing};
use crate::geocoding::zipcode_validation_error;

pub const MIN_PHONE_LEN: usize = 10;

/// Field name -> message, rendered next to the offending input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: &'static str, msg: impl Into<String>) {
        self.0.insert(field, msg.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// Raw add-listing form input, exactly as submitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingForm {
    pub name: String,
    pub species: String,
    pub breed: String,
    pub color: String,
    pub size: String,
    pub age: String,
    pub gender: String,
    pub status: String,
    pub description: String,
    pub last_seen_at: String,
    pub location_name: String,
    pub latitude: String,
    pub longitude: String,
    pub zipcode: String,
    pub contact_name: String,
    pub contact_phone: String,
    pub contact_email: String,
    pub photos: Vec<String>,
}

impl ListingForm {
    /// Builds the form from decoded `application/x-www-form-urlencoded` pairs.
    /// `photos` may repeat; unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut form = ListingForm {
            status: "lost".to_string(),
            ..ListingForm::default()
        };

        for (key, value) in pairs {
            let value = value.into();
            let slot = match key.as_ref() {
                "name" => &mut form.name,
                "species" => &mut form.species,
                "breed" => &mut form.breed,
                "color" => &mut form.color,
                "size" => &mut form.size,
                "age" => &mut form.age,
                "gender" => &mut form.gender,
                "status" => &mut form.status,
                "description" => &mut form.description,
                "last_seen_at" => &mut form.last_seen_at,
                "location_name" => &mut form.location_name,
                "latitude" => &mut form.latitude,
                "longitude" => &mut form.longitude,
                "zipcode" => &mut form.zipcode,
                "contact_name" => &mut form.contact_name,
                "contact_phone" => &mut form.contact_phone,
                "contact_email" => &mut form.contact_email,
                "photos" => {
                    form.photos.extend(
                        value
                            .lines()
                            .map(str::trim)
                            .filter(|l| !l.is_empty())
                            .map(str::to_string),
                    );
                    continue;
                }
                _ => continue,
            };
            *slot = value;
        }

        form
    }

    /// Checks every rule and either yields the listing to store or all
    /// field errors at once.
    pub fn validate(&self) -> Result<NewListing, FieldErrors> {
        let mut errors = FieldErrors::default();

        if self.name.trim().is_empty() {
            errors.insert("name", "Pet name is required");
        }

        if self.species.trim().is_empty() {
            errors.insert("species", "Species is required");
        }

        let status = if self.status.trim().is_empty() {
            errors.insert("status", "Status is required");
            None
        } else {
            match self.status.parse::<ListingStatus>() {
                Ok(s) => Some(s),
                Err(_) => {
                    errors.insert("status", "Status must be lost or found");
                    None
                }
            }
        };

        if self.location_name.trim().is_empty() {
            errors.insert("location_name", "Location is required");
        }

        let last_seen_at = if self.last_seen_at.trim().is_empty() {
            errors.insert("last_seen_at", "Last seen date is required");
            None
        } else {
            let parsed = parse_timestamp(&self.last_seen_at);
            if parsed.is_none() {
                errors.insert("last_seen_at", "Last seen date is not a valid date");
            }
            parsed
        };

        if self.contact_name.trim().is_empty() {
            errors.insert("contact_name", "Contact name is required");
        }

        let email = self.contact_email.trim();
        let phone = self.contact_phone.trim();

        if email.is_empty() && phone.is_empty() {
            errors.insert(
                "contact",
                "At least one contact method (email or phone) is required",
            );
        }

        if !email.is_empty() && !email_re().is_match(email) {
            errors.insert("contact_email", "Please enter a valid email address");
        }

        if !phone.is_empty() && phone.chars().count() < MIN_PHONE_LEN {
            errors.insert("contact_phone", "Please enter a valid phone number");
        }

        if let Some(msg) = zipcode_validation_error(&self.zipcode) {
            errors.insert("zipcode", msg);
        }

        let coordinates = match self.coordinates() {
            Ok(c) => c,
            Err(msg) => {
                errors.insert("coordinates", msg);
                None
            }
        };

        match (status, last_seen_at) {
            (Some(status), Some(last_seen_at)) if errors.is_empty() => Ok(NewListing {
                status,
                name: self.name.trim().to_string(),
                species: self.species.trim().to_string(),
                breed: optional(&self.breed),
                color: optional(&self.color),
                size: optional(&self.size),
                age: optional(&self.age),
                gender: optional(&self.gender),
                description: self.description.trim().to_string(),
                photos: self.photos.clone(),
                last_seen_at,
                location_name: optional(&self.location_name),
                coordinates,
                zipcode: optional(&self.zipcode),
                contact: Contact {
                    name: self.contact_name.trim().to_string(),
                    email: optional(email),
                    phone: optional(phone),
                },
            }),
            _ => Err(errors),
        }
    }

    fn coordinates(&self) -> Result<Option<Coordinates>, &'static str> {
        const MSG: &str = "Please pick a location from the suggestions";

        let lat = self.latitude.trim();
        let lon = self.longitude.trim();
        if lat.is_empty() && lon.is_empty() {
            return Ok(None);
        }

        let (Ok(lat), Ok(lon)) = (lat.parse::<f64>(), lon.parse::<f64>()) else {
            return Err(MSG);
        };

        let c = Coordinates::new(lat, lon);
        if c.is_valid() {
            Ok(Some(c))
        } else {
            Err(MSG)
        }
    }
}

impl From<&NewListing> for ListingForm {
    fn from(l: &NewListing) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        ListingForm {
            name: l.name.clone(),
            species: l.species.clone(),
            breed: text(&l.breed),
            color: text(&l.color),
            size: text(&l.size),
            age: text(&l.age),
            gender: text(&l.gender),
            status: l.status.as_str().to_string(),
            description: l.description.clone(),
            last_seen_at: l.last_seen_at.to_rfc3339(),
            location_name: text(&l.location_name),
            latitude: l.coordinates.map(|c| c.latitude.to_string()).unwrap_or_default(),
            longitude: l.coordinates.map(|c| c.longitude.to_string()).unwrap_or_default(),
            zipcode: text(&l.zipcode),
            contact_name: l.contact.name.clone(),
            contact_phone: text(&l.contact.phone),
            contact_email: text(&l.contact.email),
            photos: l.photos.clone(),
        }
    }
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex"))
}

fn optional(v: &str) -> Option<String> {
    let v = v.trim();
    (!v.is_empty()).then(|| v.to_string())
}

/// Accepts RFC 3339, `<input type="datetime-local">` values and bare dates.
/// Zone-less values are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
