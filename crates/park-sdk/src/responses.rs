//! Response bodies returned by the park server.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// An item annotated with its distance from the query point.
#[derive(Debug, Clone, Deserialize)]
pub struct Nearby<T> {
    #[serde(flatten)]
    pub item: T,
    pub distance_km: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckInReceipt {
    pub success: bool,
    pub checkin_id: i64,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutReceipt {
    pub success: bool,
    pub message: String,
    pub checkout_time: DateTime<Utc>,
}

/// One past visit, newest first in history listings.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryEntry {
    pub checkin_id: i64,
    pub username: String,
    pub facility_id: Option<i64>,
    pub facility_name: Option<String>,
    pub trail_id: Option<i64>,
    pub trail_name: Option<String>,
    pub activity_type: String,
    pub party_size: u32,
    pub notes: Option<String>,
    pub checkin_time: DateTime<Utc>,
    pub checkout_time: Option<DateTime<Utc>>,
}

impl HistoryEntry {
    /// Name of the facility or trail visited.
    pub fn place(&self) -> &str {
        self.facility_name
            .as_deref()
            .or(self.trail_name.as_deref())
            .unwrap_or("unknown")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherReport {
    pub current: CurrentWeather,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeather {
    pub temp_c: f64,
    pub condition: WeatherCondition,
    pub wind_kph: Option<f64>,
    pub humidity: Option<f64>,
    pub vis_km: Option<f64>,
    pub suitable_for_outdoor: bool,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherCondition {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use park_core::Amenity;

    #[test]
    fn test_nearby_flattened_amenity() {
        let body = r#"{
            "amenity_id": 1,
            "amenity_type": "restroom",
            "name": "Main Restrooms",
            "accessible": true,
            "operating_hours": "6:00-22:00",
            "latitude": 40.1163,
            "longitude": -85.7588,
            "distance_km": 0.25
        }"#;
        let nearby: Nearby<Amenity> = serde_json::from_str(body).unwrap();
        assert_eq!(nearby.item.name, "Main Restrooms");
        assert_eq!(nearby.distance_km, 0.25);
    }

    #[test]
    fn test_history_place_prefers_facility() {
        let body = r#"{
            "checkin_id": 7,
            "username": "casey",
            "facility_id": null,
            "facility_name": null,
            "trail_id": 1,
            "trail_name": "Lakeside Loop",
            "activity_type": "walk",
            "party_size": 2,
            "notes": null,
            "checkin_time": "2026-05-01T14:00:00.000Z",
            "checkout_time": null
        }"#;
        let entry: HistoryEntry = serde_json::from_str(body).unwrap();
        assert_eq!(entry.place(), "Lakeside Loop");
        assert!(entry.checkout_time.is_none());
    }
}
