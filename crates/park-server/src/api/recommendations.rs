//! Activity recommendations.

use axum::{extract::State, Json};
use chrono::Utc;
use std::sync::Arc;

use crate::api::ApiError;
use crate::persistence::{facilities, trails, weather};
use crate::state::AppState;
use park_core::{recommend_with_rules, Recommendation};

/// Today's recommendations: quiet facilities, then trails if the weather
/// allows.
/// GET /api/recommendations
pub async fn get_recommendations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Recommendation>>, ApiError> {
    let internal = |err| ApiError::internal("Failed to generate recommendations", err);

    let observation = weather::latest_observation(state.pool())
        .await
        .map_err(internal)?;
    let loads = facilities::load_facility_loads(state.pool(), Utc::now(), state.active_window())
        .await
        .map_err(internal)?;
    let trails = trails::list_trails(state.pool(), None)
        .await
        .map_err(internal)?;

    Ok(Json(recommend_with_rules(
        &loads,
        &trails,
        observation.as_ref(),
        &state.config().recommendation_rules,
    )))
}
