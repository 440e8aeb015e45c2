//! Live facility occupancy derived from active check-ins.

use crate::models::{ActiveCheckIn, CheckIn, OccupancyLevel, OccupancySnapshot};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Headcount and load for one facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupancy {
    pub current: u32,
    /// Rounded half-up, 0 when capacity is 0, never above 100
    pub percentage: u8,
}

/// Compute occupancy from the check-ins that are currently active.
///
/// The caller is responsible for passing only active check-ins; see
/// [`is_active`].
pub fn occupancy(capacity: u32, active_checkins: &[ActiveCheckIn]) -> Occupancy {
    let current = active_checkins
        .iter()
        .fold(0u32, |sum, c| sum.saturating_add(c.party_size));

    Occupancy {
        current,
        percentage: load_percentage(current, capacity),
    }
}

/// Build the snapshot served to clients for a facility.
pub fn snapshot(facility_id: i64, capacity: u32, active_checkins: &[ActiveCheckIn]) -> OccupancySnapshot {
    let Occupancy { current, percentage } = occupancy(capacity, active_checkins);
    OccupancySnapshot {
        facility_id,
        capacity,
        current,
        percentage,
        level: OccupancyLevel::from_percentage(percentage),
    }
}

/// A check-in counts toward occupancy while it has not been checked out and
/// was created no earlier than `now - window`.
pub fn is_active(checkin: &CheckIn, now: DateTime<Utc>, window: Duration) -> bool {
    checkin.checkout_time.is_none() && checkin.checkin_time >= now - window
}

fn load_percentage(current: u32, capacity: u32) -> u8 {
    if capacity == 0 {
        return 0;
    }
    let current = u64::from(current);
    let capacity = u64::from(capacity);
    // round(current / capacity * 100) with halves rounded up
    let rounded = (current * 200 + capacity) / (capacity * 2);
    rounded.min(100) as u8
}
