//! Weather suitability for outdoor activity.

use crate::models::WeatherObservation;

/// Whether current weather favors outdoor activity.
///
/// The judgment itself comes from the weather feed. Missing data counts as
/// good weather so recommendations are never starved by a feed outage.
pub fn is_suitable_for_outdoor(observation: Option<&WeatherObservation>) -> bool {
    observation.map_or(true, |obs| obs.suitable_for_outdoor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn observation(suitable: bool) -> WeatherObservation {
        WeatherObservation {
            temperature_c: 18.0,
            condition: "Light rain".into(),
            wind_kph: None,
            humidity: None,
            visibility_km: None,
            suitable_for_outdoor: suitable,
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn test_absent_observation_is_suitable() {
        assert!(is_suitable_for_outdoor(None));
    }

    #[test]
    fn test_passes_through_flag() {
        assert!(is_suitable_for_outdoor(Some(&observation(true))));
        assert!(!is_suitable_for_outdoor(Some(&observation(false))));
    }
}
