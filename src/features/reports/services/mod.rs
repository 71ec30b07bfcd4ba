mod geocoding_service;
mod location_service;
mod report_service;

pub use geocoding_service::{GeocodingClient, NominatimClient};
pub use location_service::LocationService;
pub use report_service::{ReportFilter, ReportService, SubmitReport};
