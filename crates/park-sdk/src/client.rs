//! Park SDK client for browsing the park and managing check-ins.

use anyhow::Result;
use park_core::{
    Amenity, CheckInRequest, Difficulty, Facility, OccupancySnapshot, Recommendation, Trail,
};
use reqwest::{Response, StatusCode, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use crate::responses::{CheckInReceipt, CheckoutReceipt, HistoryEntry, Nearby, WeatherReport};

/// Non-success reply from the server, carrying its `{"error": ...}` message.
#[derive(Debug, Error)]
#[error("{status}: {message}")]
pub struct ApiFailure {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Observation pushed to `POST /api/weather`.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherUpdate {
    pub temp_c: f64,
    pub condition: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_kph: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vis_km: Option<f64>,
    pub suitable_for_outdoor: bool,
}

/// Client for the park server.
pub struct ParkClient {
    base_url: String,
    client: reqwest::Client,
}

impl ParkClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List facilities, optionally only one type.
    pub async fn facilities(&self, facility_type: Option<&str>) -> Result<Vec<Facility>> {
        let mut request = self.client.get(format!("{}/api/facilities", self.base_url));
        if let Some(facility_type) = facility_type {
            request = request.query(&[("type", facility_type)]);
        }
        read_json(request.send().await?).await
    }

    /// Facilities nearest to a point, optionally only one type.
    pub async fn facilities_near(
        &self,
        lat: f64,
        lon: f64,
        limit: Option<usize>,
        facility_type: Option<&str>,
    ) -> Result<Vec<Nearby<Facility>>> {
        let mut request = self
            .client
            .get(format!("{}/api/facilities/near", self.base_url))
            .query(&near_query(lat, lon, limit));
        if let Some(facility_type) = facility_type {
            request = request.query(&[("type", facility_type)]);
        }
        read_json(request.send().await?).await
    }

    pub async fn trails(&self, difficulty: Option<Difficulty>) -> Result<Vec<Trail>> {
        let mut request = self.client.get(format!("{}/api/trails", self.base_url));
        if let Some(difficulty) = difficulty {
            request = request.query(&[("difficulty", difficulty.as_str())]);
        }
        read_json(request.send().await?).await
    }

    pub async fn amenities(&self) -> Result<Vec<Amenity>> {
        let response = self
            .client
            .get(format!("{}/api/amenities", self.base_url))
            .send()
            .await?;
        read_json(response).await
    }

    /// Amenities nearest to a point.
    pub async fn amenities_near(
        &self,
        lat: f64,
        lon: f64,
        limit: Option<usize>,
    ) -> Result<Vec<Nearby<Amenity>>> {
        let request = self
            .client
            .get(format!("{}/api/amenities", self.base_url))
            .query(&near_query(lat, lon, limit));
        read_json(request.send().await?).await
    }

    /// Current occupancy for every facility.
    pub async fn occupancy(&self) -> Result<Vec<OccupancySnapshot>> {
        let response = self
            .client
            .get(format!("{}/api/occupancy", self.base_url))
            .send()
            .await?;
        read_json(response).await
    }

    pub async fn facility_occupancy(&self, facility_id: i64) -> Result<OccupancySnapshot> {
        let response = self
            .client
            .get(format!("{}/api/occupancy/{}", self.base_url, facility_id))
            .send()
            .await?;
        read_json(response).await
    }

    pub async fn recommendations(&self) -> Result<Vec<Recommendation>> {
        let response = self
            .client
            .get(format!("{}/api/recommendations", self.base_url))
            .send()
            .await?;
        read_json(response).await
    }

    /// Latest observation, or `None` when the server has no weather yet.
    pub async fn weather(&self) -> Result<Option<WeatherReport>> {
        let response = self
            .client
            .get(format!("{}/api/weather", self.base_url))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        read_json(response).await.map(Some)
    }

    pub async fn record_weather(&self, update: &WeatherUpdate) -> Result<WeatherReport> {
        let response = self
            .client
            .post(format!("{}/api/weather", self.base_url))
            .json(update)
            .send()
            .await?;
        read_json(response).await
    }

    pub async fn check_in(&self, request: &CheckInRequest) -> Result<CheckInReceipt> {
        let response = self
            .client
            .post(format!("{}/api/checkins", self.base_url))
            .json(request)
            .send()
            .await?;
        let receipt: CheckInReceipt = read_json(response).await?;
        tracing::debug!("Checked in as #{}", receipt.checkin_id);
        Ok(receipt)
    }

    pub async fn checkout(&self, checkin_id: i64) -> Result<CheckoutReceipt> {
        let response = self
            .client
            .put(format!(
                "{}/api/checkins/{}/checkout",
                self.base_url, checkin_id
            ))
            .send()
            .await?;
        read_json(response).await
    }

    /// Most recent check-ins for a user.
    pub async fn history(&self, username: &str) -> Result<Vec<HistoryEntry>> {
        let response = self.client.get(self.history_url(username)?).send().await?;
        read_json(response).await
    }

    /// `/api/checkins/user/{username}` with the name escaped as one path segment.
    fn history_url(&self, username: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Invalid server URL: {}", self.base_url))?
            .pop_if_empty()
            .extend(["api", "checkins", "user", username]);
        Ok(url)
    }
}

fn near_query(lat: f64, lon: f64, limit: Option<usize>) -> Vec<(&'static str, String)> {
    let mut query = vec![("lat", lat.to_string()), ("lon", lon.to_string())];
    if let Some(limit) = limit {
        query.push(("limit", limit.to_string()));
    }
    query
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.error)
        .unwrap_or(body);
    Err(ApiFailure { status, message }.into())
}
