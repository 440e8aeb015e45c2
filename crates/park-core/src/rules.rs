//! Tunable thresholds for activity recommendations.

use serde::{Deserialize, Serialize};

/// Default trailing window, in minutes, during which an open check-in counts
/// toward occupancy.
pub const DEFAULT_ACTIVE_WINDOW_MINUTES: i64 = 4 * 60;

/// Configuration for the recommendation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationRules {
    /// A facility is recommended only while `current < capacity * ratio`
    pub low_occupancy_ratio: f64,
    /// Maximum number of facility recommendations
    pub max_facilities: usize,
    /// Maximum number of trail recommendations
    pub max_trails: usize,
}

impl Default for RecommendationRules {
    fn default() -> Self {
        Self {
            low_occupancy_ratio: 0.5,
            max_facilities: 3,
            max_trails: 2,
        }
    }
}

impl RecommendationRules {
    /// Strict "under the ratio" check for a facility's headcount.
    pub fn is_low_occupancy(&self, current: u32, capacity: u32) -> bool {
        f64::from(current) < f64::from(capacity) * self.low_occupancy_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_capacity_is_not_low() {
        let rules = RecommendationRules::default();
        assert!(rules.is_low_occupancy(4, 10));
        assert!(!rules.is_low_occupancy(5, 10));
        assert!(!rules.is_low_occupancy(0, 0));
        // 3 < 3.5
        assert!(rules.is_low_occupancy(3, 7));
    }
}
