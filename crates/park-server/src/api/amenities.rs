//! Amenity API endpoints.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::api::{nearby, ApiError, NearQuery};
use crate::persistence::amenities;
use crate::state::AppState;

/// List amenities. With `lat` and `lon`, the nearest come first and each
/// entry carries its `distance_km`.
/// GET /api/amenities?lat=40.116&lon=-85.758&limit=3
pub async fn list_amenities(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NearQuery>,
) -> Result<Response, ApiError> {
    let origin = query.optional_origin()?;
    let all = amenities::list_amenities(state.pool())
        .await
        .map_err(|err| ApiError::internal("Failed to fetch amenities", err))?;

    Ok(match origin {
        Some(origin) => Json(nearby(all, origin, query.limit())).into_response(),
        None => Json(all).into_response(),
    })
}
