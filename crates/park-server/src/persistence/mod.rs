//! Persistence layer for the park server.
//!
//! Provides SQLite-backed storage for facilities, trails, amenities,
//! check-ins and weather observations.

pub mod amenities;
pub mod checkins;
pub mod db;
pub mod facilities;
pub mod seed;
pub mod trails;
pub mod weather;

pub use db::{init_database, Database};

use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};

/// Format a timestamp for storage. Fixed width, so text order is time order.
pub fn to_db_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a stored timestamp.
pub fn from_db_timestamp(value: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)?.with_timezone(&Utc))
}
