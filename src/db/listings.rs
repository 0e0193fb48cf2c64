use crate::db::connection::Database;
use crate::domain::filters::filter_by_radius;
use crate::domain::listing::{Contact, Coordinates, Listing, ListingStatus, NewListing};
use crate::errors::ServerError;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::info;

const LISTING_COLUMNS: &str = r#"
    id,             -- 0
    status,         -- 1
    name,           -- 2
    species,        -- 3
    breed,          -- 4
    color,          -- 5
    size,           -- 6
    age,            -- 7
    gender,         -- 8
    description,    -- 9
    photos,         -- 10 (JSON)
    last_seen_at,   -- 11
    location_name,  -- 12
    latitude,       -- 13
    longitude,      -- 14
    zipcode,        -- 15
    contact_name,   -- 16
    contact_phone,  -- 17
    contact_email,  -- 18
    created_at      -- 19
"#;

fn row_to_listing(row: &Row<'_>) -> rusqlite::Result<Listing> {
    let status_text: String = row.get(1)?;
    let status = status_text
        .parse::<ListingStatus>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, e.into()))?;

    let photos_json: String = row.get(10)?;
    let photos: Vec<String> = serde_json::from_str(&photos_json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(10, Type::Text, Box::new(e)))?;

    let latitude: Option<f64> = row.get(13)?;
    let longitude: Option<f64> = row.get(14)?;
    let coordinates = match (latitude, longitude) {
        (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
        _ => None,
    };

    Ok(Listing {
        id: row.get(0)?,
        status,
        name: row.get(2)?,
        species: row.get(3)?,
        breed: row.get(4)?,
        color: row.get(5)?,
        size: row.get(6)?,
        age: row.get(7)?,
        gender: row.get(8)?,
        description: row.get(9)?,
        photos,
        last_seen_at: row.get(11)?,
        location_name: row.get(12)?,
        coordinates,
        zipcode: row.get(15)?,
        contact: Contact {
            name: row.get(16)?,
            phone: row.get(17)?,
            email: row.get(18)?,
        },
        created_at: row.get(19)?,
    })
}

fn photos_json(photos: &[String]) -> Result<String, ServerError> {
    serde_json::to_string(photos).map_err(|e| ServerError::DbError(e.to_string()))
}

fn query_listings(
    conn: &Connection,
    where_clause: &str,
    params: impl rusqlite::Params,
) -> Result<Vec<Listing>, ServerError> {
    let sql = format!(
        "SELECT {LISTING_COLUMNS} FROM listings {where_clause} ORDER BY created_at DESC, id DESC"
    );
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map(params, row_to_listing)
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(results)
}

fn fetch_listing(conn: &Connection, id: i64) -> Result<Option<Listing>, ServerError> {
    let sql = format!("SELECT {LISTING_COLUMNS} FROM listings WHERE id = ?1");
    conn.query_row(&sql, params![id], row_to_listing)
        .optional()
        .map_err(|e| ServerError::DbError(e.to_string()))
}

/// Newest first.
pub fn get_all_listings(db: &Database) -> Result<Vec<Listing>, ServerError> {
    db.with_conn(|conn| query_listings(conn, "", []))
}

pub fn get_listings_by_status(
    db: &Database,
    status: ListingStatus,
) -> Result<Vec<Listing>, ServerError> {
    db.with_conn(|conn| query_listings(conn, "WHERE status = ?1", params![status.as_str()]))
}

pub fn get_listing(db: &Database, id: i64) -> Result<Option<Listing>, ServerError> {
    db.with_conn(|conn| fetch_listing(conn, id))
}

pub fn insert_listing(
    db: &Database,
    new: &NewListing,
    now: DateTime<Utc>,
) -> Result<Listing, ServerError> {
    let photos = photos_json(&new.photos)?;

    let id = db.with_conn(|conn| {
        conn.execute(
            r#"
            INSERT INTO listings (
                status, name, species, breed, color, size, age, gender,
                description, photos, last_seen_at,
                location_name, latitude, longitude, zipcode,
                contact_name, contact_phone, contact_email,
                created_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8,
                ?9, ?10, ?11,
                ?12, ?13, ?14, ?15,
                ?16, ?17, ?18,
                ?19
            )
            "#,
            params![
                new.status.as_str(),
                new.name,
                new.species,
                new.breed,
                new.color,
                new.size,
                new.age,
                new.gender,
                new.description,
                photos,
                new.last_seen_at,
                new.location_name,
                new.coordinates.map(|c| c.latitude),
                new.coordinates.map(|c| c.longitude),
                new.zipcode,
                new.contact.name,
                new.contact.phone,
                new.contact.email,
                now,
            ],
        )
        .map_err(|e| ServerError::DbError(format!("Insert failed: {e}")))?;

        Ok(conn.last_insert_rowid())
    })?;

    info!(id, status = %new.status, name = %new.name, "listing created");
    Ok(Listing::from_new(id, now, new.clone()))
}

/// Replaces every editable field; `created_at` is kept.
pub fn update_listing(
    db: &Database,
    id: i64,
    new: &NewListing,
) -> Result<Option<Listing>, ServerError> {
    let photos = photos_json(&new.photos)?;

    db.with_conn(|conn| {
        let changed = conn
            .execute(
                r#"
                UPDATE listings SET
                    status = ?1, name = ?2, species = ?3, breed = ?4, color = ?5,
                    size = ?6, age = ?7, gender = ?8,
                    description = ?9, photos = ?10, last_seen_at = ?11,
                    location_name = ?12, latitude = ?13, longitude = ?14, zipcode = ?15,
                    contact_name = ?16, contact_phone = ?17, contact_email = ?18
                WHERE id = ?19
                "#,
                params![
                    new.status.as_str(),
                    new.name,
                    new.species,
                    new.breed,
                    new.color,
                    new.size,
                    new.age,
                    new.gender,
                    new.description,
                    photos,
                    new.last_seen_at,
                    new.location_name,
                    new.coordinates.map(|c| c.latitude),
                    new.coordinates.map(|c| c.longitude),
                    new.zipcode,
                    new.contact.name,
                    new.contact.phone,
                    new.contact.email,
                    id,
                ],
            )
            .map_err(|e| ServerError::DbError(format!("Update failed: {e}")))?;

        if changed == 0 {
            return Ok(None);
        }
        fetch_listing(conn, id)
    })
}

/// Returns whether a row was removed.
pub fn delete_listing(db: &Database, id: i64) -> Result<bool, ServerError> {
    db.with_conn(|conn| {
        let n = conn
            .execute("DELETE FROM listings WHERE id = ?1", params![id])
            .map_err(|e| ServerError::DbError(format!("Delete failed: {e}")))?;
        Ok(n > 0)
    })
}

pub fn search_listings_by_location(
    db: &Database,
    center: Coordinates,
    radius_km: f64,
) -> Result<Vec<Listing>, ServerError> {
    let located = db.with_conn(|conn| {
        query_listings(
            conn,
            "WHERE latitude IS NOT NULL AND longitude IS NOT NULL",
            [],
        )
    })?;
    Ok(filter_by_radius(located, center, radius_km))
}
