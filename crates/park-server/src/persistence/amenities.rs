//! Amenity persistence operations.

use anyhow::Result;
use park_core::models::Amenity;
use sqlx::{SqliteExecutor, SqlitePool};

/// Insert an amenity and return its ID.
pub async fn insert_amenity<'e>(executor: impl SqliteExecutor<'e>, amenity: &Amenity) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO amenities (amenity_type, name, accessible, operating_hours, latitude, longitude)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(&amenity.amenity_type)
    .bind(&amenity.name)
    .bind(amenity.accessible)
    .bind(&amenity.operating_hours)
    .bind(amenity.latitude)
    .bind(amenity.longitude)
    .execute(executor)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Load all amenities in ID order.
pub async fn list_amenities(pool: &SqlitePool) -> Result<Vec<Amenity>> {
    let rows = sqlx::query_as::<_, AmenityRow>(
        "SELECT amenity_id, amenity_type, name, accessible, operating_hours, latitude, longitude FROM amenities ORDER BY amenity_id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|r| r.into()).collect())
}

// Internal row type for SQLx
#[derive(sqlx::FromRow)]
struct AmenityRow {
    amenity_id: i64,
    amenity_type: String,
    name: String,
    accessible: bool,
    operating_hours: Option<String>,
    latitude: f64,
    longitude: f64,
}

impl From<AmenityRow> for Amenity {
    fn from(row: AmenityRow) -> Self {
        Amenity {
            amenity_id: row.amenity_id,
            amenity_type: row.amenity_type,
            name: row.name,
            accessible: row.accessible,
            operating_hours: row.operating_hours,
            latitude: row.latitude,
            longitude: row.longitude,
        }
    }
}
