use std::sync::Arc;
use std::time::Duration;

use super::GeocodingClient;
use crate::core::error::{AppError, Result};
use crate::features::reports::models::{
    LocationInput, LocationSource, ReportLocation, ResolvedLocation,
};
use crate::shared::constants::{
    DEFAULT_ADDRESS, DEFAULT_LATITUDE, DEFAULT_LONGITUDE, LOCATION_CAPTURED_LABEL,
};

/// Reject coordinates no device could have produced
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(AppError::Validation(
            "Latitude must be between -90 and 90".to_string(),
        ));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(AppError::Validation(
            "Longitude must be between -180 and 180".to_string(),
        ));
    }
    Ok(())
}

/// Turns the client's location attempt into a location a report can carry.
///
/// Failures never block submission: they fall back to the default city
/// location with a warning the client can show inline.
pub struct LocationService {
    geocoder: Arc<dyn GeocodingClient>,
    geocoding_timeout: Duration,
}

impl LocationService {
    pub fn new(geocoder: Arc<dyn GeocodingClient>, geocoding_timeout: Duration) -> Self {
        Self {
            geocoder,
            geocoding_timeout,
        }
    }

    pub fn default_location() -> ReportLocation {
        ReportLocation {
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
            address: DEFAULT_ADDRESS.to_string(),
        }
    }

    pub async fn resolve(&self, input: LocationInput) -> Result<ResolvedLocation> {
        match input {
            LocationInput::Gps {
                latitude,
                longitude,
            } => {
                validate_coordinates(latitude, longitude)?;
                let address = self.address_for(latitude, longitude).await;
                Ok(ResolvedLocation {
                    latitude,
                    longitude,
                    address,
                    source: LocationSource::Gps,
                    warning: None,
                })
            }
            LocationInput::Manual { address } => {
                let address = address.trim();
                if address.is_empty() {
                    return Err(AppError::Validation(
                        "Please enter an address for the issue location.".to_string(),
                    ));
                }
                Ok(ResolvedLocation {
                    latitude: DEFAULT_LATITUDE,
                    longitude: DEFAULT_LONGITUDE,
                    address: address.to_string(),
                    source: LocationSource::Manual,
                    warning: None,
                })
            }
            LocationInput::Unavailable { reason } => {
                tracing::warn!("Client location unavailable: {:?}", reason);
                let fallback = Self::default_location();
                Ok(ResolvedLocation {
                    latitude: fallback.latitude,
                    longitude: fallback.longitude,
                    address: fallback.address,
                    source: LocationSource::Default,
                    warning: Some(reason.message().to_string()),
                })
            }
        }
    }

    /// Best-effort reverse geocode; any failure yields the generic label
    async fn address_for(&self, latitude: f64, longitude: f64) -> String {
        let lookup = self.geocoder.reverse(latitude, longitude);
        match tokio::time::timeout(self.geocoding_timeout, lookup).await {
            Ok(Ok(Some(address))) if !address.trim().is_empty() => address,
            Ok(Ok(_)) => LOCATION_CAPTURED_LABEL.to_string(),
            Ok(Err(e)) => {
                tracing::warn!("Reverse geocoding failed: {}", e);
                LOCATION_CAPTURED_LABEL.to_string()
            }
            Err(_) => {
                tracing::warn!(
                    "Reverse geocoding timed out after {:?}",
                    self.geocoding_timeout
                );
                LOCATION_CAPTURED_LABEL.to_string()
            }
        }
    }
}
