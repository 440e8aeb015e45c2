//! Trail API endpoints.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::api::ApiError;
use crate::persistence::trails;
use crate::state::AppState;
use park_core::{Difficulty, Trail};

#[derive(Debug, Deserialize)]
pub struct TrailQuery {
    pub difficulty: Option<String>,
}

/// List trails with their path geometry.
/// GET /api/trails?difficulty=easy
pub async fn list_trails(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TrailQuery>,
) -> Result<Json<Vec<Trail>>, ApiError> {
    let difficulty = query
        .difficulty
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .map(str::parse::<Difficulty>)
        .transpose()
        .map_err(|err| ApiError::BadRequest(err.to_string()))?;

    trails::list_trails(state.pool(), difficulty)
        .await
        .map(Json)
        .map_err(|err| ApiError::internal("Failed to fetch trails", err))
}
