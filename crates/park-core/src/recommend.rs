//! Activity recommendations from occupancy and weather.

use crate::models::{
    Difficulty, FacilityLoad, Recommendation, RecommendationKind, Trail, WeatherObservation,
};
use crate::occupancy::occupancy;
use crate::rules::RecommendationRules;
use crate::weather::is_suitable_for_outdoor;

/// Recommend quiet facilities and, in good weather, approachable trails.
///
/// Facilities come first, least busy first; trails follow, easy before
/// moderate. Ties keep input order.
pub fn recommend(
    facilities: &[FacilityLoad],
    trails: &[Trail],
    weather: Option<&WeatherObservation>,
) -> Vec<Recommendation> {
    recommend_with_rules(facilities, trails, weather, &RecommendationRules::default())
}

/// Recommend using custom thresholds.
pub fn recommend_with_rules(
    facilities: &[FacilityLoad],
    trails: &[Trail],
    weather: Option<&WeatherObservation>,
    rules: &RecommendationRules,
) -> Vec<Recommendation> {
    let mut recommendations = facility_recommendations(facilities, rules);

    if is_suitable_for_outdoor(weather) {
        recommendations.extend(trail_recommendations(trails, rules));
    }

    recommendations
}

fn facility_recommendations(
    facilities: &[FacilityLoad],
    rules: &RecommendationRules,
) -> Vec<Recommendation> {
    let mut quiet: Vec<(&FacilityLoad, u32)> = facilities
        .iter()
        .map(|facility| {
            let occ = occupancy(facility.capacity, &facility.active_checkins);
            (facility, occ.current)
        })
        .filter(|(facility, current)| rules.is_low_occupancy(*current, facility.capacity))
        .collect();

    // sort_by_key is stable
    quiet.sort_by_key(|(_, current)| *current);

    quiet
        .into_iter()
        .take(rules.max_facilities)
        .map(|(facility, current)| Recommendation {
            name: facility.name.clone(),
            kind: RecommendationKind::Facility,
            reason: format!(
                "Low occupancy ({}/{} people)",
                current, facility.capacity
            ),
        })
        .collect()
}

fn trail_recommendations(trails: &[Trail], rules: &RecommendationRules) -> Vec<Recommendation> {
    let mut approachable: Vec<&Trail> = trails
        .iter()
        .filter(|trail| {
            matches!(
                trail.difficulty_level,
                Difficulty::Easy | Difficulty::Moderate
            )
        })
        .collect();

    approachable.sort_by_key(|trail| trail.difficulty_level);

    approachable
        .into_iter()
        .take(rules.max_trails)
        .map(|trail| Recommendation {
            name: trail.name.clone(),
            kind: RecommendationKind::Trail,
            reason: format!(
                "Perfect weather for {} {}",
                trail.difficulty_level, trail.trail_type
            ),
        })
        .collect()
}
