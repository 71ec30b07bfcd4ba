use async_trait::async_trait;
use serde::Deserialize;

use crate::core::config::GeocodingConfig;
use crate::core::error::{AppError, Result};

/// Reverse geocoding seam: coordinates in, best-effort address out
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<Option<String>>;
}

/// Nominatim reverse response structure
#[derive(Debug, Deserialize)]
pub struct NominatimReverseResponse {
    pub display_name: Option<String>,
    pub address: Option<NominatimAddress>,
    /// Present instead of a result when Nominatim cannot geocode the point
    pub error: Option<String>,
}

/// Nominatim address components
#[derive(Debug, Default, Deserialize)]
pub struct NominatimAddress {
    pub road: Option<String>,
    pub suburb: Option<String>,
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub state: Option<String>,
}

impl NominatimAddress {
    /// Get city, falling back to town or village
    pub fn get_city(&self) -> Option<String> {
        self.city
            .clone()
            .or_else(|| self.town.clone())
            .or_else(|| self.village.clone())
    }

    /// "road, suburb, city" from whichever parts are present
    pub fn short_label(&self) -> Option<String> {
        let parts: Vec<String> = [self.road.clone(), self.suburb.clone(), self.get_city()]
            .into_iter()
            .flatten()
            .filter(|p| !p.trim().is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

impl NominatimReverseResponse {
    fn into_address(self) -> Option<String> {
        if let Some(error) = self.error {
            tracing::debug!("Nominatim could not reverse geocode: {}", error);
            return None;
        }

        self.display_name
            .filter(|name| !name.trim().is_empty())
            .or_else(|| self.address.as_ref().and_then(NominatimAddress::short_label))
    }
}

/// Reverse geocoding against the public Nominatim API
pub struct NominatimClient {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimClient {
    pub fn new(config: &GeocodingConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }
}

#[async_trait]
impl GeocodingClient for NominatimClient {
    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<Option<String>> {
        let url = format!(
            "{}/reverse?format=json&lat={}&lon={}&zoom=18&addressdetails=1",
            self.base_url, latitude, longitude
        );

        tracing::debug!("Reverse geocoding ({}, {}) -> {}", latitude, longitude, url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!("Nominatim request failed: {:?}", e);
            AppError::Geocoding(format!("Nominatim request failed: {}", e))
        })?;

        if !response.status().is_success() {
            tracing::warn!("Nominatim returned status: {}", response.status());
            return Ok(None);
        }

        let body: NominatimReverseResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Nominatim response: {:?}", e);
            AppError::Geocoding(format!("Failed to parse Nominatim response: {}", e))
        })?;

        Ok(body.into_address())
    }
}
