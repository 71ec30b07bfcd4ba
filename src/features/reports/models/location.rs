use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ReportLocation;

/// How a location's coordinates were obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LocationSource {
    Gps,
    Manual,
    Default,
}

/// Why the client could not obtain a device position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LocationFailure {
    /// The client has no geolocation capability
    Unsupported,
    PermissionDenied,
    PositionUnavailable,
    /// The capability's own timeout fired
    Timeout,
    /// The client's watchdog fired before the capability answered
    ClientTimeout,
}

impl LocationFailure {
    pub fn message(self) -> &'static str {
        match self {
            LocationFailure::Unsupported => "Geolocation is not supported by your browser",
            LocationFailure::PermissionDenied => {
                "Location permission denied. Please enable location access in your browser settings."
            }
            LocationFailure::PositionUnavailable => {
                "Location information is unavailable. Please try again."
            }
            LocationFailure::Timeout | LocationFailure::ClientTimeout => {
                "Location request timed out. Please try again."
            }
        }
    }
}

/// Outcome of the client-side location attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum LocationInput {
    Gps { latitude: f64, longitude: f64 },
    Manual { address: String },
    Unavailable { reason: LocationFailure },
}

/// A location ready to be attached to a report, with its provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ResolvedLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub source: LocationSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

// Provenance is display-only; stored reports keep just the triple.
impl From<ResolvedLocation> for ReportLocation {
    fn from(resolved: ResolvedLocation) -> Self {
        Self {
            latitude: resolved.latitude,
            longitude: resolved.longitude,
            address: resolved.address,
        }
    }
}
