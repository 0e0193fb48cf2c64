use crate::db::connection::Database;
use crate::db::listings::insert_listing;
use crate::domain::listing::{Contact, Coordinates, ListingStatus, NewListing};
use crate::errors::ServerError;
use chrono::{DateTime, Duration, Utc};
use tracing::info;

#[allow(clippy::too_many_arguments)]
fn sample(
    status: ListingStatus,
    name: &str,
    species: &str,
    breed: &str,
    color: &str,
    description: &str,
    location: &str,
    (lat, lon): (f64, f64),
    zipcode: &str,
    seen: DateTime<Utc>,
    contact: (&str, Option<&str>, Option<&str>),
) -> NewListing {
    NewListing {
        status,
        name: name.to_string(),
        species: species.to_string(),
        breed: Some(breed.to_string()),
        color: Some(color.to_string()),
        size: None,
        age: None,
        gender: None,
        description: description.to_string(),
        photos: Vec::new(),
        last_seen_at: seen,
        location_name: Some(location.to_string()),
        coordinates: Some(Coordinates::new(lat, lon)),
        zipcode: Some(zipcode.to_string()),
        contact: Contact {
            name: contact.0.to_string(),
            email: contact.1.map(str::to_string),
            phone: contact.2.map(str::to_string),
        },
    }
}

/// A handful of Buffalo-area pets for demos and local development.
pub fn sample_listings(now: DateTime<Utc>) -> Vec<NewListing> {
    vec![
        sample(
            ListingStatus::Lost,
            "Biscuit",
            "dog",
            "Beagle",
            "Brown and white",
            "Friendly beagle in a red collar. Answers to Biscuit, loves treats.",
            "Delaware Park, Buffalo, NY, USA",
            (42.9301, -78.8653),
            "14216",
            now - Duration::hours(5),
            ("Sam Rivera", Some("sam@example.com"), Some("7165550101")),
        ),
        sample(
            ListingStatus::Found,
            "Grey tabby",
            "cat",
            "Domestic shorthair",
            "Grey",
            "Young tabby found hiding under a porch. No collar, very shy.",
            "Elmwood Avenue, Elmwood Village, Buffalo, Erie County, New York, 14222, United States",
            (42.9185, -78.8770),
            "14222",
            now - Duration::days(1),
            ("Jordan Lee", None, Some("7165550102")),
        ),
        sample(
            ListingStatus::Lost,
            "Pepper",
            "dog",
            "Labrador mix",
            "Black",
            "Slipped her leash near campus. Wearing a blue harness.",
            "University at Buffalo, Buffalo, NY, USA",
            (42.9538, -78.8185),
            "14214",
            now - Duration::days(3),
            ("Alex Chen", Some("alex@example.com"), None),
        ),
        sample(
            ListingStatus::Found,
            "Budgie",
            "bird",
            "Parakeet",
            "Green and yellow",
            "Landed on our balcony downtown. Very chatty.",
            "Niagara Square, Buffalo, NY, USA",
            (42.8867, -78.8784),
            "14202",
            now - Duration::days(9),
            ("Morgan Diaz", Some("morgan@example.com"), Some("7165550104")),
        ),
    ]
}

/// Replaces the listing table contents with [`sample_listings`].
pub fn seed_sample_listings(db: &Database, now: DateTime<Utc>) -> Result<usize, ServerError> {
    db.with_conn(|conn| {
        conn.execute("DELETE FROM listings", [])
            .map_err(|e| ServerError::DbError(format!("Clear failed: {e}")))?;
        Ok(())
    })?;

    let samples = sample_listings(now);
    for (i, listing) in samples.iter().enumerate() {
        // Spread creation times so the newest-first order is stable.
        insert_listing(db, listing, now - Duration::minutes(i as i64))?;
    }

    info!(count = samples.len(), "sample listings inserted");
    Ok(samples.len())
}
