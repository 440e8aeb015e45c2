//! Core data models for the park service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A bookable sports or fitness facility (court, field, pool...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub facility_id: i64,
    pub name: String,
    /// Category tag, e.g. `basketball_court`
    pub facility_type: String,
    /// Maximum headcount; 0 means "not tracked"
    pub capacity: u32,
    pub surface_type: Option<String>,
    pub has_lighting: bool,
    pub accessible: bool,
    pub latitude: f64,
    pub longitude: f64,
}

/// Trail difficulty tier, ordered easy < moderate < hard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Moderate => "moderate",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty level '{0}'")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "moderate" => Ok(Difficulty::Moderate),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

/// GeoJSON LineString; coordinates are `[lon, lat]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineString {
    #[serde(rename = "type")]
    pub geometry_type: String,
    pub coordinates: Vec<[f64; 2]>,
}

impl LineString {
    pub fn new(coordinates: Vec<[f64; 2]>) -> Self {
        Self {
            geometry_type: "LineString".to_string(),
            coordinates,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trail {
    pub trail_id: i64,
    pub name: String,
    /// Category tag, e.g. `walking_trail`
    pub trail_type: String,
    pub distance_km: f64,
    pub difficulty_level: Difficulty,
    /// Elevation gain in meters
    pub elevation_gain: f64,
    pub surface_type: Option<String>,
    pub path_coordinates: LineString,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amenity {
    pub amenity_id: i64,
    /// Category tag, e.g. `restroom`, `water_fountain`
    pub amenity_type: String,
    pub name: String,
    pub accessible: bool,
    #[serde(default)]
    pub operating_hours: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

/// GeoJSON Point; coordinates are `[lon, lat]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "type", default)]
    pub geometry_type: PointType,
    pub coordinates: [f64; 2],
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointType {
    #[default]
    Point,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            geometry_type: PointType::Point,
            coordinates: [lon, lat],
        }
    }

    pub fn lat(&self) -> f64 {
        self.coordinates[1]
    }

    pub fn lon(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn is_valid(&self) -> bool {
        let (lat, lon) = (self.lat(), self.lon());
        lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon)
    }
}

/// What a check-in is attached to. Exactly one of facility or trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum CheckInTarget {
    Facility(i64),
    Trail(i64),
}

impl CheckInTarget {
    pub fn facility_id(&self) -> Option<i64> {
        match self {
            CheckInTarget::Facility(id) => Some(*id),
            CheckInTarget::Trail(_) => None,
        }
    }

    pub fn trail_id(&self) -> Option<i64> {
        match self {
            CheckInTarget::Trail(id) => Some(*id),
            CheckInTarget::Facility(_) => None,
        }
    }
}

/// A visitor check-in. Created on submission, closed once by checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckIn {
    pub checkin_id: i64,
    pub user_id: i64,
    pub target: CheckInTarget,
    pub activity_type: String,
    pub party_size: u32,
    pub notes: Option<String>,
    pub location: Option<GeoPoint>,
    pub checkin_time: DateTime<Utc>,
    pub checkout_time: Option<DateTime<Utc>>,
}

/// The slice of a check-in the occupancy calculator needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveCheckIn {
    pub party_size: u32,
}

impl From<&CheckIn> for ActiveCheckIn {
    fn from(checkin: &CheckIn) -> Self {
        Self {
            party_size: checkin.party_size,
        }
    }
}

/// A facility with its currently active check-ins, as handed to the
/// recommendation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityLoad {
    pub facility_id: i64,
    pub name: String,
    pub capacity: u32,
    pub active_checkins: Vec<ActiveCheckIn>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub temperature_c: f64,
    pub condition: String,
    #[serde(default)]
    pub wind_kph: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub visibility_km: Option<f64>,
    /// Decided upstream by the weather feed
    pub suitable_for_outdoor: bool,
    pub recorded_at: DateTime<Utc>,
}

/// Color tier the map uses for an occupancy bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OccupancyLevel {
    /// 50% or less
    Comfortable,
    /// Above 50%
    Busy,
    /// Above 80%
    Crowded,
}

impl OccupancyLevel {
    pub fn from_percentage(percentage: u8) -> Self {
        if percentage > 80 {
            OccupancyLevel::Crowded
        } else if percentage > 50 {
            OccupancyLevel::Busy
        } else {
            OccupancyLevel::Comfortable
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancySnapshot {
    pub facility_id: i64,
    pub capacity: u32,
    pub current: u32,
    pub percentage: u8,
    pub level: OccupancyLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Facility,
    Trail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub reason: String,
}
