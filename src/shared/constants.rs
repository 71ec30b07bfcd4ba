// =============================================================================
// LOCATION FALLBACKS
// =============================================================================

/// Latitude used when no device fix is available (Vadodara city centre)
pub const DEFAULT_LATITUDE: f64 = 22.3072;

/// Longitude used when no device fix is available (Vadodara city centre)
pub const DEFAULT_LONGITUDE: f64 = 73.1812;

/// Address label attached to the fallback coordinates
pub const DEFAULT_ADDRESS: &str = "Vadodara, Gujarat (Default Location)";

/// Address label used when reverse geocoding yields nothing
pub const LOCATION_CAPTURED_LABEL: &str = "Location captured";

// =============================================================================
// REPORTS
// =============================================================================

/// Prefix of every minted report id
pub const REPORT_ID_PREFIX: &str = "CR";

/// Trailing window used for the "recent reports" statistic
pub const RECENT_WINDOW_DAYS: i64 = 7;
