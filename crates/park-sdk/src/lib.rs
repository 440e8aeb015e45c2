//! Park SDK - client library for the park amenities API.
//!
//! Wraps the REST endpoints served by `park-server`.

pub mod client;
pub mod responses;

pub use client::{ApiFailure, ParkClient, WeatherUpdate};
pub use park_core::{CheckInRequest, Recommendation};
pub use responses::{CheckInReceipt, CheckoutReceipt, HistoryEntry, Nearby, WeatherReport};
