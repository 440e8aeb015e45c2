pub mod checkin;
pub mod models;
pub mod occupancy;
pub mod recommend;
pub mod rules;
pub mod spatial;
pub mod weather;

pub use checkin::{CheckInError, CheckInRequest, ValidCheckIn};
pub use models::{
    ActiveCheckIn, Amenity, CheckIn, CheckInTarget, Difficulty, Facility, FacilityLoad, GeoPoint,
    LineString, OccupancyLevel, OccupancySnapshot, ParseDifficultyError, Recommendation,
    RecommendationKind, Trail, WeatherObservation,
};
pub use occupancy::{is_active, occupancy, snapshot, Occupancy};
pub use recommend::{recommend, recommend_with_rules};
pub use rules::{RecommendationRules, DEFAULT_ACTIVE_WINDOW_MINUTES};
pub use spatial::{haversine_distance_km, rank_by_distance, Located};
pub use weather::is_suitable_for_outdoor;
