pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod workers;

pub use repository::{
    seed_demo_reports, InMemoryReportStore, RemoteReportRepository, ReportRepository,
    StoreLatency,
};
pub use services::{GeocodingClient, LocationService, NominatimClient, ReportService};
pub use workers::{ProgressSimulator, RandomDice};
