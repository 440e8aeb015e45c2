//! API routes for the park server.

pub mod amenities;
pub mod checkins;
mod error;
pub mod facilities;
pub mod occupancy;
pub mod recommendations;
pub mod request_id;
mod routes;
pub mod trails;
pub mod weather;

pub use error::ApiError;

use park_core::{rank_by_distance, Located};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const DEFAULT_NEAR_LIMIT: usize = 10;
const MAX_NEAR_LIMIT: usize = 100;

pub fn routes() -> axum::Router<Arc<crate::state::AppState>> {
    routes::create_router()
}

/// Query for proximity lookups.
#[derive(Debug, Default, Deserialize)]
pub struct NearQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub limit: Option<usize>,
}

impl NearQuery {
    /// The point to measure from, if one was given.
    pub fn optional_origin(&self) -> Result<Option<(f64, f64)>, ApiError> {
        match (self.lat, self.lon) {
            (None, None) => Ok(None),
            (Some(lat), Some(lon)) => {
                if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon) {
                    Ok(Some((lat, lon)))
                } else {
                    Err(ApiError::BadRequest("Coordinates out of range".to_string()))
                }
            }
            _ => Err(ApiError::BadRequest(
                "Both lat and lon are required".to_string(),
            )),
        }
    }

    pub fn origin(&self) -> Result<(f64, f64), ApiError> {
        self.optional_origin()?
            .ok_or_else(|| ApiError::BadRequest("Both lat and lon are required".to_string()))
    }

    pub fn limit(&self) -> usize {
        self.limit
            .unwrap_or(DEFAULT_NEAR_LIMIT)
            .clamp(1, MAX_NEAR_LIMIT)
    }
}

/// An item annotated with its distance from the query point.
#[derive(Debug, Serialize)]
pub struct Nearby<T> {
    #[serde(flatten)]
    pub item: T,
    pub distance_km: f64,
}

pub(crate) fn nearby<T: Located>(items: Vec<T>, origin: (f64, f64), limit: usize) -> Vec<Nearby<T>> {
    rank_by_distance(items, origin.0, origin.1)
        .into_iter()
        .take(limit)
        .map(|(item, distance_km)| Nearby { item, distance_km })
        .collect()
}

#[cfg(test)]
mod tests;
