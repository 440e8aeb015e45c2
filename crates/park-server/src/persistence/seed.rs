//! Demo reference data for a fresh database.

use anyhow::Result;
use park_core::models::{Amenity, Difficulty, Facility, LineString, Trail};
use sqlx::SqlitePool;
use tracing::info;

use super::{amenities, facilities, trails};

/// Insert a small demo park unless facilities already exist.
///
/// Returns true when data was inserted. All inserts share one transaction.
pub async fn seed_demo_park(pool: &SqlitePool) -> Result<bool> {
    let mut tx = pool.begin().await?;

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM facilities")
        .fetch_one(&mut *tx)
        .await?;
    if count > 0 {
        return Ok(false);
    }

    for facility in demo_facilities() {
        facilities::insert_facility(&mut *tx, &facility).await?;
    }
    for trail in demo_trails() {
        trails::insert_trail(&mut *tx, &trail).await?;
    }
    for amenity in demo_amenities() {
        amenities::insert_amenity(&mut *tx, &amenity).await?;
    }

    tx.commit().await?;
    info!("Seeded demo park data");
    Ok(true)
}

fn facility(
    name: &str,
    facility_type: &str,
    capacity: u32,
    surface_type: &str,
    has_lighting: bool,
    latitude: f64,
    longitude: f64,
) -> Facility {
    Facility {
        facility_id: 0,
        name: name.to_string(),
        facility_type: facility_type.to_string(),
        capacity,
        surface_type: Some(surface_type.to_string()),
        has_lighting,
        accessible: true,
        latitude,
        longitude,
    }
}

fn demo_facilities() -> Vec<Facility> {
    vec![
        facility("North Basketball Court", "basketball_court", 20, "asphalt", true, 40.1172, -85.7597),
        facility("Tennis Center", "tennis_court", 16, "hard_court", true, 40.1158, -85.7601),
        facility("Soccer Field A", "soccer_field", 44, "natural_grass", false, 40.1149, -85.7572),
        facility("Pickleball Courts", "pickleball_court", 24, "acrylic", true, 40.1168, -85.7566),
        facility("Fitness Station Loop", "outdoor_gym", 12, "rubber", false, 40.1177, -85.7580),
    ]
}

fn demo_trails() -> Vec<Trail> {
    let trail = |name: &str,
                 trail_type: &str,
                 distance_km: f64,
                 difficulty_level: Difficulty,
                 elevation_gain: f64,
                 path: Vec<[f64; 2]>| Trail {
        trail_id: 0,
        name: name.to_string(),
        trail_type: trail_type.to_string(),
        distance_km,
        difficulty_level,
        elevation_gain,
        surface_type: Some("crushed_stone".to_string()),
        path_coordinates: LineString::new(path),
    };

    vec![
        trail(
            "Lakeside Loop",
            "walking_trail",
            1.8,
            Difficulty::Easy,
            6.0,
            vec![[-85.7610, 40.1160], [-85.7595, 40.1182], [-85.7570, 40.1178], [-85.7610, 40.1160]],
        ),
        trail(
            "Prairie Run",
            "running_trail",
            4.2,
            Difficulty::Moderate,
            24.0,
            vec![[-85.7620, 40.1140], [-85.7580, 40.1135], [-85.7545, 40.1150]],
        ),
        trail(
            "Ridge Climb",
            "hiking_trail",
            3.1,
            Difficulty::Hard,
            85.0,
            vec![[-85.7550, 40.1185], [-85.7530, 40.1200], [-85.7515, 40.1221]],
        ),
    ]
}

fn demo_amenities() -> Vec<Amenity> {
    let amenity = |amenity_type: &str, name: &str, hours: Option<&str>, latitude: f64, longitude: f64| Amenity {
        amenity_id: 0,
        amenity_type: amenity_type.to_string(),
        name: name.to_string(),
        accessible: true,
        operating_hours: hours.map(str::to_string),
        latitude,
        longitude,
    };

    vec![
        amenity("restroom", "Main Restrooms", Some("6:00-22:00"), 40.1163, -85.7588),
        amenity("water_fountain", "Court Fountain", None, 40.1170, -85.7592),
        amenity("parking", "North Lot", None, 40.1181, -85.7605),
        amenity("picnic_shelter", "Lakeside Shelter", Some("dawn-dusk"), 40.1175, -85.7575),
    ]
}
