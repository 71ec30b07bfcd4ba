mod demo;
mod in_memory;
mod remote;

pub use demo::seed_demo_reports;
pub use in_memory::{InMemoryReportStore, StoreLatency};
pub use remote::RemoteReportRepository;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::reports::models::{
    CivicReport, NewCivicReport, ReportStatistics, ReportStatus,
};

/// Storage seam for civic reports.
///
/// Unknown ids are never an error: lookups yield `None` and status updates
/// yield `false`. Only transport failures of a remote backend surface as `Err`.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Insert a report and return its freshly minted id
    async fn create(&self, report: NewCivicReport) -> Result<String>;

    async fn get(&self, id: &str) -> Result<Option<CivicReport>>;

    /// All reports, newest submission first
    async fn list(&self) -> Result<Vec<CivicReport>>;

    /// Set the status unconditionally and refresh `updated_at`
    async fn update_status(&self, id: &str, status: ReportStatus) -> Result<bool>;

    async fn list_by_status(&self, status: ReportStatus) -> Result<Vec<CivicReport>>;

    /// Case-insensitive match on the issue type label
    async fn list_by_type(&self, issue_type: &str) -> Result<Vec<CivicReport>>;

    async fn statistics(&self) -> Result<ReportStatistics>;

    /// Drop every report and restart the id sequence
    async fn clear(&self) -> Result<()>;

    async fn count(&self) -> Result<usize>;
}
