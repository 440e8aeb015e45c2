//! Facility persistence operations.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use park_core::is_active;
use park_core::models::{ActiveCheckIn, Facility, FacilityLoad};
use sqlx::{SqliteExecutor, SqlitePool};
use std::collections::HashMap;

use super::checkins;

/// Insert a facility and return its ID. `facility_id` on the input is ignored.
pub async fn insert_facility<'e>(executor: impl SqliteExecutor<'e>, facility: &Facility) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO facilities (name, facility_type, capacity, surface_type, has_lighting, accessible, latitude, longitude)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
    )
    .bind(&facility.name)
    .bind(&facility.facility_type)
    .bind(i64::from(facility.capacity))
    .bind(&facility.surface_type)
    .bind(facility.has_lighting)
    .bind(facility.accessible)
    .bind(facility.latitude)
    .bind(facility.longitude)
    .execute(executor)
    .await?;

    Ok(result.last_insert_rowid())
}

/// List facilities, optionally restricted to one `facility_type`.
pub async fn list_facilities(pool: &SqlitePool, facility_type: Option<&str>) -> Result<Vec<Facility>> {
    let rows = sqlx::query_as::<_, FacilityRow>(
        r#"
        SELECT facility_id, name, facility_type, capacity, surface_type, has_lighting, accessible, latitude, longitude
        FROM facilities
        WHERE (?1 IS NULL OR facility_type = ?1)
        ORDER BY facility_id
        "#,
    )
    .bind(facility_type)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
}

/// Get a facility by ID.
pub async fn get_facility(pool: &SqlitePool, facility_id: i64) -> Result<Option<Facility>> {
    let row = sqlx::query_as::<_, FacilityRow>(
        r#"
        SELECT facility_id, name, facility_type, capacity, surface_type, has_lighting, accessible, latitude, longitude
        FROM facilities
        WHERE facility_id = ?1
        "#,
    )
    .bind(facility_id)
    .fetch_optional(pool)
    .await?;

    row.map(|r| r.try_into()).transpose()
}

/// Active check-ins for one facility at `now`.
pub async fn active_checkins(
    pool: &SqlitePool,
    facility_id: i64,
    now: DateTime<Utc>,
    window: Duration,
) -> Result<Vec<ActiveCheckIn>> {
    let open = checkins::open_facility_checkins(pool, Some(facility_id)).await?;
    Ok(open
        .iter()
        .filter(|c| is_active(c, now, window))
        .map(ActiveCheckIn::from)
        .collect())
}

/// Every facility with its active check-ins at `now`, ordered by facility ID.
pub async fn load_facility_loads(
    pool: &SqlitePool,
    now: DateTime<Utc>,
    window: Duration,
) -> Result<Vec<FacilityLoad>> {
    let facilities: Vec<(i64, String, i64)> = sqlx::query_as(
        "SELECT facility_id, name, capacity FROM facilities ORDER BY facility_id",
    )
    .fetch_all(pool)
    .await?;

    let mut by_facility: HashMap<i64, Vec<ActiveCheckIn>> = HashMap::new();
    for checkin in checkins::open_facility_checkins(pool, None).await? {
        let Some(facility_id) = checkin.target.facility_id() else {
            continue;
        };
        if is_active(&checkin, now, window) {
            by_facility
                .entry(facility_id)
                .or_default()
                .push(ActiveCheckIn::from(&checkin));
        }
    }

    facilities
        .into_iter()
        .map(|(facility_id, name, capacity)| -> Result<FacilityLoad> {
            Ok(FacilityLoad {
                facility_id,
                name,
                capacity: u32::try_from(capacity)?,
                active_checkins: by_facility.remove(&facility_id).unwrap_or_default(),
            })
        })
        .collect()
}

// Internal row type for SQLx
#[derive(sqlx::FromRow)]
struct FacilityRow {
    facility_id: i64,
    name: String,
    facility_type: String,
    capacity: i64,
    surface_type: Option<String>,
    has_lighting: bool,
    accessible: bool,
    latitude: f64,
    longitude: f64,
}

impl TryFrom<FacilityRow> for Facility {
    type Error = anyhow::Error;

    fn try_from(row: FacilityRow) -> Result<Self> {
        Ok(Facility {
            facility_id: row.facility_id,
            name: row.name,
            facility_type: row.facility_type,
            capacity: u32::try_from(row.capacity)?,
            surface_type: row.surface_type,
            has_lighting: row.has_lighting,
            accessible: row.accessible,
            latitude: row.latitude,
            longitude: row.longitude,
        })
    }
}
