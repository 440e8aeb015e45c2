//! Weather endpoints.
//!
//! The weather feed posts observations; the map reads the latest one.

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::ApiError;
use crate::persistence::weather;
use crate::state::AppState;
use park_core::WeatherObservation;

#[derive(Debug, Serialize)]
pub struct WeatherReport {
    pub current: CurrentWeather,
}

#[derive(Debug, Serialize)]
pub struct CurrentWeather {
    pub temp_c: f64,
    pub condition: Condition,
    pub wind_kph: Option<f64>,
    pub humidity: Option<f64>,
    pub vis_km: Option<f64>,
    pub suitable_for_outdoor: bool,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct Condition {
    pub text: String,
}

impl From<WeatherObservation> for WeatherReport {
    fn from(obs: WeatherObservation) -> Self {
        WeatherReport {
            current: CurrentWeather {
                temp_c: obs.temperature_c,
                condition: Condition {
                    text: obs.condition,
                },
                wind_kph: obs.wind_kph,
                humidity: obs.humidity,
                vis_km: obs.visibility_km,
                suitable_for_outdoor: obs.suitable_for_outdoor,
                recorded_at: obs.recorded_at,
            },
        }
    }
}

/// Observation pushed by the weather feed.
#[derive(Debug, Deserialize)]
pub struct RecordWeatherRequest {
    pub temp_c: f64,
    pub condition: String,
    pub wind_kph: Option<f64>,
    pub humidity: Option<f64>,
    pub vis_km: Option<f64>,
    pub suitable_for_outdoor: bool,
    /// Defaults to the time the server receives it
    pub recorded_at: Option<DateTime<Utc>>,
}

/// Latest weather observation.
/// GET /api/weather
pub async fn get_weather(
    State(state): State<Arc<AppState>>,
) -> Result<Json<WeatherReport>, ApiError> {
    weather::latest_observation(state.pool())
        .await
        .map_err(|err| ApiError::internal("Failed to fetch weather", err))?
        .map(|obs| Json(obs.into()))
        .ok_or(ApiError::NotFound("Weather data unavailable"))
}

/// Record a weather observation.
/// POST /api/weather
pub async fn record_weather(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RecordWeatherRequest>,
) -> Result<(StatusCode, Json<WeatherReport>), ApiError> {
    if !request.temp_c.is_finite() {
        return Err(ApiError::BadRequest("Temperature must be a finite number".to_string()));
    }
    if request.condition.trim().is_empty() {
        return Err(ApiError::BadRequest("Missing weather condition".to_string()));
    }

    let observation = WeatherObservation {
        temperature_c: request.temp_c,
        condition: request.condition.trim().to_string(),
        wind_kph: request.wind_kph,
        humidity: request.humidity,
        visibility_km: request.vis_km,
        suitable_for_outdoor: request.suitable_for_outdoor,
        recorded_at: request.recorded_at.unwrap_or_else(Utc::now),
    };

    weather::insert_observation(state.pool(), &observation)
        .await
        .map_err(|err| ApiError::internal("Failed to record weather", err))?;

    tracing::info!(
        "Recorded weather '{}' at {} (outdoor: {})",
        observation.condition,
        observation.recorded_at,
        observation.suitable_for_outdoor
    );

    Ok((StatusCode::CREATED, Json(observation.into())))
}
