//! Check-in API endpoints.
//!
//! Visitors check in to exactly one facility or trail and check out once.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::api::ApiError;
use crate::persistence::checkins::{self, CheckInHistoryEntry, CheckoutOutcome};
use crate::persistence::{facilities, trails};
use crate::state::AppState;
use park_core::{CheckInRequest, CheckInTarget};

const HISTORY_LIMIT: u32 = 10;

#[derive(Debug, Serialize)]
pub struct CheckInResponse {
    pub success: bool,
    pub checkin_id: i64,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub success: bool,
    pub message: String,
    pub checkout_time: DateTime<Utc>,
}

/// Submit a check-in.
/// POST /api/checkins
pub async fn create_checkin(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CheckInRequest>,
) -> Result<Json<CheckInResponse>, ApiError> {
    let checkin = request.validate()?;

    let target_exists = match checkin.target {
        CheckInTarget::Facility(id) => facilities::get_facility(state.pool(), id)
            .await
            .map(|f| f.is_some()),
        CheckInTarget::Trail(id) => trails::trail_exists(state.pool(), id).await,
    }
    .map_err(|err| ApiError::internal("Failed to create check-in", err))?;

    if !target_exists {
        return Err(match checkin.target {
            CheckInTarget::Facility(_) => ApiError::NotFound("Facility not found"),
            CheckInTarget::Trail(_) => ApiError::NotFound("Trail not found"),
        });
    }

    let checkin_id = checkins::create_checkin(state.pool(), &checkin, Utc::now())
        .await
        .map_err(|err| ApiError::internal("Failed to create check-in", err))?;

    tracing::info!(
        "Check-in {} by '{}' ({:?}, party of {})",
        checkin_id,
        checkin.user_name,
        checkin.target,
        checkin.party_size
    );

    Ok(Json(CheckInResponse {
        success: true,
        checkin_id,
        message: "Check-in successful!".to_string(),
    }))
}

/// Close an open check-in.
/// PUT /api/checkins/:checkin_id/checkout
pub async fn checkout(
    State(state): State<Arc<AppState>>,
    Path(checkin_id): Path<i64>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let outcome = checkins::checkout(state.pool(), checkin_id, Utc::now())
        .await
        .map_err(|err| ApiError::internal("Failed to checkout", err))?;

    match outcome {
        CheckoutOutcome::CheckedOut(checkout_time) => {
            tracing::info!("Check-in {} checked out", checkin_id);
            Ok(Json(CheckoutResponse {
                success: true,
                message: "Checked out successfully".to_string(),
                checkout_time,
            }))
        }
        CheckoutOutcome::AlreadyCheckedOut => Err(ApiError::Conflict("Already checked out")),
        CheckoutOutcome::NotFound => Err(ApiError::NotFound("Check-in not found")),
    }
}

/// Recent check-ins for a visitor.
/// GET /api/checkins/user/:username
pub async fn user_history(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<Json<Vec<CheckInHistoryEntry>>, ApiError> {
    checkins::user_history(state.pool(), &username, HISTORY_LIMIT)
        .await
        .map(Json)
        .map_err(|err| ApiError::internal("Failed to fetch check-in history", err))
}
