//! Weather observation persistence.

use anyhow::Result;
use park_core::models::WeatherObservation;
use sqlx::SqlitePool;

use super::{from_db_timestamp, to_db_timestamp};

/// Store an observation from the weather feed.
pub async fn insert_observation(pool: &SqlitePool, obs: &WeatherObservation) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO weather_data (temperature, weather_condition, wind_kph, humidity, vis_km, suitable_for_outdoor, recorded_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
    )
    .bind(obs.temperature_c)
    .bind(&obs.condition)
    .bind(obs.wind_kph)
    .bind(obs.humidity)
    .bind(obs.visibility_km)
    .bind(obs.suitable_for_outdoor)
    .bind(to_db_timestamp(obs.recorded_at))
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// The most recent observation, if any has been recorded.
pub async fn latest_observation(pool: &SqlitePool) -> Result<Option<WeatherObservation>> {
    let row = sqlx::query_as::<_, WeatherRow>(
        r#"
        SELECT temperature, weather_condition, wind_kph, humidity, vis_km, suitable_for_outdoor, recorded_at
        FROM weather_data
        ORDER BY recorded_at DESC, weather_id DESC
        LIMIT 1
        "#,
    )
    .fetch_optional(pool)
    .await?;

    row.map(|r| r.try_into()).transpose()
}

// Internal row type for SQLx
#[derive(sqlx::FromRow)]
struct WeatherRow {
    temperature: f64,
    weather_condition: String,
    wind_kph: Option<f64>,
    humidity: Option<f64>,
    vis_km: Option<f64>,
    suitable_for_outdoor: bool,
    recorded_at: String,
}

impl TryFrom<WeatherRow> for WeatherObservation {
    type Error = anyhow::Error;

    fn try_from(row: WeatherRow) -> Result<Self> {
        Ok(WeatherObservation {
            temperature_c: row.temperature,
            condition: row.weather_condition,
            wind_kph: row.wind_kph,
            humidity: row.humidity,
            visibility_km: row.vis_km,
            suitable_for_outdoor: row.suitable_for_outdoor,
            recorded_at: from_db_timestamp(&row.recorded_at)?,
        })
    }
}
