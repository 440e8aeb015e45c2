//! Trail persistence operations.

use anyhow::Result;
use park_core::models::{Difficulty, LineString, Trail};
use sqlx::{SqliteExecutor, SqlitePool};

/// Insert a trail and return its ID. `trail_id` on the input is ignored.
pub async fn insert_trail<'e>(executor: impl SqliteExecutor<'e>, trail: &Trail) -> Result<i64> {
    let path_json = serde_json::to_string(&trail.path_coordinates.coordinates)?;

    let result = sqlx::query(
        r#"
        INSERT INTO trails (name, trail_type, distance_km, difficulty_level, elevation_gain, surface_type, path_geometry)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
    )
    .bind(&trail.name)
    .bind(&trail.trail_type)
    .bind(trail.distance_km)
    .bind(trail.difficulty_level.as_str())
    .bind(trail.elevation_gain)
    .bind(&trail.surface_type)
    .bind(&path_json)
    .execute(executor)
    .await?;

    Ok(result.last_insert_rowid())
}

/// List trails in ID order, optionally restricted to one difficulty.
pub async fn list_trails(pool: &SqlitePool, difficulty: Option<Difficulty>) -> Result<Vec<Trail>> {
    let rows = sqlx::query_as::<_, TrailRow>(
        r#"
        SELECT trail_id, name, trail_type, distance_km, difficulty_level, elevation_gain, surface_type, path_geometry
        FROM trails
        WHERE (?1 IS NULL OR difficulty_level = ?1)
        ORDER BY trail_id
        "#,
    )
    .bind(difficulty.map(|d| d.as_str()))
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
}

/// Whether a trail with this ID exists.
pub async fn trail_exists(pool: &SqlitePool, trail_id: i64) -> Result<bool> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT trail_id FROM trails WHERE trail_id = ?1")
        .bind(trail_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}

// Internal row type for SQLx
#[derive(sqlx::FromRow)]
struct TrailRow {
    trail_id: i64,
    name: String,
    trail_type: String,
    distance_km: f64,
    difficulty_level: String,
    elevation_gain: f64,
    surface_type: Option<String>,
    path_geometry: String,
}

impl TryFrom<TrailRow> for Trail {
    type Error = anyhow::Error;

    fn try_from(row: TrailRow) -> Result<Self> {
        let difficulty_level: Difficulty = row.difficulty_level.parse()?;
        let coordinates: Vec<[f64; 2]> = serde_json::from_str(&row.path_geometry)?;

        Ok(Trail {
            trail_id: row.trail_id,
            name: row.name,
            trail_type: row.trail_type,
            distance_km: row.distance_km,
            difficulty_level,
            elevation_gain: row.elevation_gain,
            surface_type: row.surface_type,
            path_coordinates: LineString::new(coordinates),
        })
    }
}
