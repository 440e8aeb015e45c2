//! Facility API endpoints.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::api::{nearby, ApiError, NearQuery, Nearby};
use crate::persistence::facilities;
use crate::state::AppState;
use park_core::Facility;

#[derive(Debug, Deserialize)]
pub struct FacilityQuery {
    /// Filter by `facility_type`
    #[serde(rename = "type")]
    pub facility_type: Option<String>,
}

impl FacilityQuery {
    fn facility_type(&self) -> Option<&str> {
        self.facility_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// List facilities.
/// GET /api/facilities?type=tennis_court
pub async fn list_facilities(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FacilityQuery>,
) -> Result<Json<Vec<Facility>>, ApiError> {
    facilities::list_facilities(state.pool(), query.facility_type())
        .await
        .map(Json)
        .map_err(|err| ApiError::internal("Failed to fetch facilities", err))
}

/// Facilities ordered by distance from a point. The type filter applies
/// before `limit`.
/// GET /api/facilities/near?lat=40.11&lon=-85.75&limit=5&type=tennis_court
pub async fn facilities_near(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NearQuery>,
    Query(filter): Query<FacilityQuery>,
) -> Result<Json<Vec<Nearby<Facility>>>, ApiError> {
    let origin = query.origin()?;
    let all = facilities::list_facilities(state.pool(), filter.facility_type())
        .await
        .map_err(|err| ApiError::internal("Failed to fetch facilities", err))?;

    Ok(Json(nearby(all, origin, query.limit())))
}
