use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use super::ReportStatus;

/// Aggregate counts over the report store.
///
/// `by_status` and `by_type` only carry keys that occur at least once;
/// an absent key means zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReportStatistics {
    pub total: usize,
    #[schema(value_type = Object)]
    pub by_status: BTreeMap<ReportStatus, usize>,
    #[schema(value_type = Object)]
    pub by_type: BTreeMap<String, usize>,
    /// Reports submitted within the trailing seven days
    pub recent_count: usize,
}

impl ReportStatistics {
    pub fn status_count(&self, status: ReportStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}
