//! REST API routes.

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::api::{
    amenities, checkins, facilities, occupancy, recommendations, request_id, trails, weather,
};
use crate::state::AppState;

/// Create the API router.
pub fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/facilities", get(facilities::list_facilities))
        .route("/api/facilities/near", get(facilities::facilities_near))
        .route("/api/trails", get(trails::list_trails))
        .route("/api/amenities", get(amenities::list_amenities))
        // Check-ins
        .route("/api/checkins", post(checkins::create_checkin))
        .route("/api/checkins/:checkin_id/checkout", put(checkins::checkout))
        .route("/api/checkins/user/:username", get(checkins::user_history))
        // Occupancy and recommendations
        .route("/api/occupancy", get(occupancy::list_occupancy))
        .route("/api/occupancy/:facility_id", get(occupancy::get_occupancy))
        .route("/api/recommendations", get(recommendations::get_recommendations))
        // Weather
        .route(
            "/api/weather",
            get(weather::get_weather).post(weather::record_weather),
        )
        .layer(middleware::from_fn(request_id::ensure_request_id))
}
