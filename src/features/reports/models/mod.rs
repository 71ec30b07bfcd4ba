mod location;
mod report;
mod statistics;

pub use location::{LocationFailure, LocationInput, LocationSource, ResolvedLocation};
pub use report::{
    format_file_size, CivicReport, NewCivicReport, Photo, ReportLocation, ReportSeverity,
    ReportStatus,
};
pub use statistics::ReportStatistics;
