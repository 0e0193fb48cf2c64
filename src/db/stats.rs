use crate::db::connection::Database;
use crate::errors::ServerError;
use rusqlite::Connection;
use serde::Serialize;

#[derive(Debug, Default, PartialEq, Serialize)]
pub struct ListingStats {
    pub total: i64,
    pub lost: i64,
    pub found: i64,
    /// (species, count), most common first.
    pub by_species: Vec<(String, i64)>,
    /// (zipcode, count), most common first. Listings without a ZIP are left out.
    pub by_zipcode: Vec<(String, i64)>,
}

fn counts(conn: &Connection, sql: &str) -> Result<Vec<(String, i64)>, ServerError> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}

pub fn get_statistics(db: &Database) -> Result<ListingStats, ServerError> {
    db.with_conn(|conn| {
        let (total, lost, found) = conn
            .query_row(
                r#"
                SELECT
                    COUNT(*),
                    COALESCE(SUM(status = 'lost'), 0),
                    COALESCE(SUM(status = 'found'), 0)
                FROM listings
                "#,
                [],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
            )
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let by_species = counts(
            conn,
            "SELECT species, COUNT(*) AS n FROM listings GROUP BY species ORDER BY n DESC, species",
        )?;

        let by_zipcode = counts(
            conn,
            r#"
            SELECT zipcode, COUNT(*) AS n FROM listings
            WHERE zipcode IS NOT NULL AND zipcode <> ''
            GROUP BY zipcode ORDER BY n DESC, zipcode
            "#,
        )?;

        Ok(ListingStats {
            total,
            lost,
            found,
            by_species,
            by_zipcode,
        })
    })
}
