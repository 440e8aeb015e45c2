//! Check-in submission validation.

use crate::models::{CheckInTarget, GeoPoint};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_PARTY_SIZE: u32 = 1;
pub const MAX_PARTY_SIZE: u32 = 50;

/// Check-in as submitted by a visitor. Every field is optional on the wire so
/// that validation, not deserialization, decides what is wrong.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckInRequest {
    pub user_name: Option<String>,
    pub activity_type: Option<String>,
    pub party_size: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
    pub facility_id: Option<i64>,
    pub trail_id: Option<i64>,
    #[serde(default)]
    pub checkin_location: Option<GeoPoint>,
}

/// A check-in that passed validation and is ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidCheckIn {
    pub user_name: String,
    pub activity_type: String,
    pub party_size: u32,
    pub notes: Option<String>,
    pub target: CheckInTarget,
    pub location: Option<GeoPoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckInError {
    #[error("Missing required fields")]
    MissingFields,
    #[error("Must select either a facility or trail")]
    NoTarget,
    #[error("Cannot select both facility and trail")]
    BothTargets,
    #[error("Party size must be between 1 and 50")]
    PartySize(i64),
    #[error("Invalid check-in location")]
    InvalidLocation,
}

impl CheckInRequest {
    pub fn validate(self) -> Result<ValidCheckIn, CheckInError> {
        let user_name = non_blank(self.user_name).ok_or(CheckInError::MissingFields)?;
        let activity_type = non_blank(self.activity_type).ok_or(CheckInError::MissingFields)?;
        let party_size = self
            .party_size
            .filter(|size| *size != 0)
            .ok_or(CheckInError::MissingFields)?;

        // An ID of 0 never names a row and counts as no selection
        let facility_id = self.facility_id.filter(|id| *id != 0);
        let trail_id = self.trail_id.filter(|id| *id != 0);

        let target = match (facility_id, trail_id) {
            (None, None) => return Err(CheckInError::NoTarget),
            (Some(_), Some(_)) => return Err(CheckInError::BothTargets),
            (Some(id), None) => CheckInTarget::Facility(id),
            (None, Some(id)) => CheckInTarget::Trail(id),
        };

        let party_size = u32::try_from(party_size)
            .ok()
            .filter(|size| (MIN_PARTY_SIZE..=MAX_PARTY_SIZE).contains(size))
            .ok_or(CheckInError::PartySize(party_size))?;

        if let Some(location) = &self.checkin_location {
            if !location.is_valid() {
                return Err(CheckInError::InvalidLocation);
            }
        }

        Ok(ValidCheckIn {
            user_name,
            activity_type,
            party_size,
            notes: non_blank(self.notes),
            target,
            location: self.checkin_location,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
