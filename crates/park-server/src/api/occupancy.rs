//! Live occupancy endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use crate::api::ApiError;
use crate::persistence::facilities;
use crate::state::AppState;
use park_core::occupancy::snapshot;
use park_core::OccupancySnapshot;

/// Occupancy of one facility.
/// GET /api/occupancy/:facility_id
pub async fn get_occupancy(
    State(state): State<Arc<AppState>>,
    Path(facility_id): Path<i64>,
) -> Result<Json<OccupancySnapshot>, ApiError> {
    let facility = facilities::get_facility(state.pool(), facility_id)
        .await
        .map_err(|err| ApiError::internal("Failed to fetch occupancy", err))?
        .ok_or(ApiError::NotFound("Facility not found"))?;

    let active = facilities::active_checkins(state.pool(), facility_id, Utc::now(), state.active_window())
        .await
        .map_err(|err| ApiError::internal("Failed to fetch occupancy", err))?;

    Ok(Json(snapshot(facility_id, facility.capacity, &active)))
}

/// Occupancy of every facility, in facility ID order.
/// GET /api/occupancy
pub async fn list_occupancy(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<OccupancySnapshot>>, ApiError> {
    let loads = facilities::load_facility_loads(state.pool(), Utc::now(), state.active_window())
        .await
        .map_err(|err| ApiError::internal("Failed to fetch occupancy", err))?;

    Ok(Json(
        loads
            .iter()
            .map(|load| snapshot(load.facility_id, load.capacity, &load.active_checkins))
            .collect(),
    ))
}
