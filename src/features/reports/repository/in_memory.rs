use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use super::ReportRepository;
use crate::core::error::Result;
use crate::features::reports::models::{
    CivicReport, NewCivicReport, ReportStatistics, ReportStatus,
};
use crate::shared::clock::{Clock, SystemClock};
use crate::shared::constants::{RECENT_WINDOW_DAYS, REPORT_ID_PREFIX};

/// Artificial per-operation delays emulating a remote data service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreLatency {
    pub create: Duration,
    pub get: Duration,
    pub list: Duration,
    pub update_status: Duration,
    pub filter: Duration,
    pub statistics: Duration,
}

impl StoreLatency {
    /// Per-operation delays of the hosted demo data service
    pub fn simulated() -> Self {
        Self {
            create: Duration::from_millis(500),
            get: Duration::from_millis(200),
            list: Duration::from_millis(300),
            update_status: Duration::from_millis(400),
            filter: Duration::from_millis(200),
            statistics: Duration::ZERO,
        }
    }

    pub fn none() -> Self {
        Self {
            create: Duration::ZERO,
            get: Duration::ZERO,
            list: Duration::ZERO,
            update_status: Duration::ZERO,
            filter: Duration::ZERO,
            statistics: Duration::ZERO,
        }
    }
}

impl Default for StoreLatency {
    fn default() -> Self {
        Self::simulated()
    }
}

struct StoreState {
    reports: HashMap<String, CivicReport>,
    next_id: u64,
}

impl StoreState {
    fn new() -> Self {
        Self {
            reports: HashMap::new(),
            next_id: 1,
        }
    }

    fn mint_id(&mut self) -> String {
        let id = format!("{}{:04}", REPORT_ID_PREFIX, self.next_id);
        self.next_id += 1;
        id
    }

    fn collect_newest_first<F>(&self, predicate: F) -> Vec<CivicReport>
    where
        F: Fn(&CivicReport) -> bool,
    {
        let mut reports: Vec<CivicReport> = self
            .reports
            .values()
            .filter(|r| predicate(r))
            .cloned()
            .collect();
        // Same-instant submissions fall back to creation order
        reports.sort_by(|a, b| {
            b.submitted_at
                .cmp(&a.submitted_at)
                .then_with(|| (b.id.len(), &b.id).cmp(&(a.id.len(), &a.id)))
        });
        reports
    }
}

/// In-process report store.
///
/// Every mutation is applied while the lock is held and before the
/// artificial delay, so concurrent callers observe writes in the order the
/// writes ran, not the order their delays finish.
pub struct InMemoryReportStore {
    state: RwLock<StoreState>,
    latency: StoreLatency,
    clock: Arc<dyn Clock>,
}

impl InMemoryReportStore {
    pub fn new(latency: StoreLatency) -> Self {
        Self::with_clock(latency, Arc::new(SystemClock))
    }

    pub fn with_clock(latency: StoreLatency, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: RwLock::new(StoreState::new()),
            latency,
            clock,
        }
    }
}

impl Default for InMemoryReportStore {
    fn default() -> Self {
        Self::new(StoreLatency::default())
    }
}

async fn simulate_latency(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

fn compute_statistics<'a>(
    reports: impl Iterator<Item = &'a CivicReport>,
    now: DateTime<Utc>,
) -> ReportStatistics {
    let window_start = now - ChronoDuration::days(RECENT_WINDOW_DAYS);
    let mut stats = ReportStatistics::default();

    for report in reports {
        stats.total += 1;
        *stats.by_status.entry(report.status).or_insert(0) += 1;
        *stats.by_type.entry(report.issue_type.clone()).or_insert(0) += 1;
        if report.submitted_at >= window_start {
            stats.recent_count += 1;
        }
    }

    stats
}

#[async_trait]
impl ReportRepository for InMemoryReportStore {
    async fn create(&self, report: NewCivicReport) -> Result<String> {
        let id = {
            let mut state = self.state.write().await;
            let id = state.mint_id();
            let record = report.into_report(id.clone(), self.clock.now());
            state.reports.insert(id.clone(), record);
            id
        };

        tracing::debug!("Stored civic report {}", id);
        simulate_latency(self.latency.create).await;
        Ok(id)
    }

    async fn get(&self, id: &str) -> Result<Option<CivicReport>> {
        let report = self.state.read().await.reports.get(id).cloned();
        simulate_latency(self.latency.get).await;
        Ok(report)
    }

    async fn list(&self) -> Result<Vec<CivicReport>> {
        let reports = self.state.read().await.collect_newest_first(|_| true);
        simulate_latency(self.latency.list).await;
        Ok(reports)
    }

    async fn update_status(&self, id: &str, status: ReportStatus) -> Result<bool> {
        let updated = {
            let mut state = self.state.write().await;
            match state.reports.get_mut(id) {
                Some(report) => {
                    report.status = status;
                    report.updated_at = self.clock.now();
                    true
                }
                None => false,
            }
        };

        if !updated {
            tracing::debug!("Status update for unknown report {}", id);
            return Ok(false);
        }

        tracing::debug!("Report {} moved to {}", id, status);
        simulate_latency(self.latency.update_status).await;
        Ok(true)
    }

    async fn list_by_status(&self, status: ReportStatus) -> Result<Vec<CivicReport>> {
        let reports = self
            .state
            .read()
            .await
            .collect_newest_first(|r| r.status == status);
        simulate_latency(self.latency.filter).await;
        Ok(reports)
    }

    async fn list_by_type(&self, issue_type: &str) -> Result<Vec<CivicReport>> {
        let wanted = issue_type.to_lowercase();
        let reports = self
            .state
            .read()
            .await
            .collect_newest_first(|r| r.issue_type.to_lowercase() == wanted);
        simulate_latency(self.latency.filter).await;
        Ok(reports)
    }

    async fn statistics(&self) -> Result<ReportStatistics> {
        let stats = {
            let state = self.state.read().await;
            compute_statistics(state.reports.values(), self.clock.now())
        };
        simulate_latency(self.latency.statistics).await;
        Ok(stats)
    }

    async fn clear(&self) -> Result<()> {
        let mut state = self.state.write().await;
        *state = StoreState::new();
        tracing::info!("Report store cleared");
        Ok(())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.state.read().await.reports.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::models::{Photo, ReportLocation, ReportSeverity};
    use crate::shared::test_helpers::ManualClock;
    use fake::faker::lorem::en::Sentence;
    use fake::Fake;

    fn new_report(issue_type: &str, severity: ReportSeverity) -> NewCivicReport {
        NewCivicReport {
            issue_type: issue_type.to_string(),
            description: Sentence(3..8).fake(),
            photo: Photo::new("issue.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF]),
            location: ReportLocation {
                latitude: 22.3072,
                longitude: 73.1812,
                address: "RC Dutt Road, Vadodara".to_string(),
            },
            status: ReportStatus::Reported,
            severity,
        }
    }

    /// Store on a manual clock that ticks one minute per created report
    fn store_with_clock() -> (InMemoryReportStore, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::starting_at_epoch());
        let store = InMemoryReportStore::with_clock(StoreLatency::none(), clock.clone());
        (store, clock)
    }

    async fn create_at_next_minute(
        store: &InMemoryReportStore,
        clock: &ManualClock,
        issue_type: &str,
    ) -> String {
        clock.advance(ChronoDuration::minutes(1));
        store
            .create(new_report(issue_type, ReportSeverity::Medium))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_first_report_gets_cr0001_and_reported_status() {
        let (store, _clock) = store_with_clock();

        let id = store
            .create(new_report("Pothole", ReportSeverity::High))
            .await
            .unwrap();
        assert_eq!(id, "CR0001");

        let report = store.get("CR0001").await.unwrap().unwrap();
        assert_eq!(report.status, ReportStatus::Reported);
        assert_eq!(report.severity, ReportSeverity::High);
        assert_eq!(report.issue_type, "Pothole");
        assert_eq!(report.submitted_at, report.updated_at);
    }

    #[tokio::test]
    async fn test_ids_strictly_increase() {
        let (store, _clock) = store_with_clock();

        let mut previous = 0u64;
        for _ in 0..12 {
            let id = store
                .create(new_report("Garbage", ReportSeverity::Low))
                .await
                .unwrap();
            let n: u64 = id.trim_start_matches(REPORT_ID_PREFIX).parse().unwrap();
            assert!(n > previous);
            previous = n;
        }
        assert_eq!(store.count().await.unwrap(), 12);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let (store, clock) = store_with_clock();
        let first = create_at_next_minute(&store, &clock, "Pothole").await;
        let second = create_at_next_minute(&store, &clock, "Garbage").await;
        let third = create_at_next_minute(&store, &clock, "Water Leak").await;

        let ids: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![third, second, first]);
    }

    #[tokio::test]
    async fn test_update_status_refreshes_updated_at() {
        let (store, clock) = store_with_clock();
        let id = create_at_next_minute(&store, &clock, "Pothole").await;

        clock.advance(ChronoDuration::seconds(30));
        assert!(store
            .update_status(&id, ReportStatus::Resolved)
            .await
            .unwrap());

        let report = store.get(&id).await.unwrap().unwrap();
        assert_eq!(report.status, ReportStatus::Resolved);
        assert!(report.updated_at > report.submitted_at);

        let stats = store.statistics().await.unwrap();
        assert_eq!(stats.status_count(ReportStatus::Resolved), 1);
    }

    #[tokio::test]
    async fn test_update_status_is_unconditional() {
        let (store, clock) = store_with_clock();
        let id = create_at_next_minute(&store, &clock, "Pothole").await;

        store
            .update_status(&id, ReportStatus::Resolved)
            .await
            .unwrap();
        assert!(store
            .update_status(&id, ReportStatus::Reported)
            .await
            .unwrap());
        assert_eq!(
            store.get(&id).await.unwrap().unwrap().status,
            ReportStatus::Reported
        );
    }

    #[tokio::test]
    async fn test_unknown_id_degrades_gracefully() {
        let (store, clock) = store_with_clock();
        create_at_next_minute(&store, &clock, "Pothole").await;

        assert!(!store
            .update_status("CR9999", ReportStatus::Resolved)
            .await
            .unwrap());
        assert!(store.get("CR9999").await.unwrap().is_none());
        assert!(store.get("not-an-id").await.unwrap().is_none());
        assert_eq!(store.count().await.unwrap(), 1);

        let stats = store.statistics().await.unwrap();
        assert_eq!(stats.status_count(ReportStatus::Resolved), 0);
    }

    #[tokio::test]
    async fn test_list_by_type_is_case_insensitive() {
        let (store, clock) = store_with_clock();
        let pothole = create_at_next_minute(&store, &clock, "Pothole").await;
        create_at_next_minute(&store, &clock, "Garbage").await;

        let matches = store.list_by_type("pothole").await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, pothole);

        assert!(store.list_by_type("streetlight").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_by_status_filters_exactly() {
        let (store, clock) = store_with_clock();
        let a = create_at_next_minute(&store, &clock, "Pothole").await;
        let b = create_at_next_minute(&store, &clock, "Garbage").await;
        create_at_next_minute(&store, &clock, "Street Light").await;
        store
            .update_status(&a, ReportStatus::InProgress)
            .await
            .unwrap();
        store
            .update_status(&b, ReportStatus::InProgress)
            .await
            .unwrap();

        let in_progress = store
            .list_by_status(ReportStatus::InProgress)
            .await
            .unwrap();
        let ids: Vec<&str> = in_progress.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec![b.as_str(), a.as_str()]);
    }

    #[tokio::test]
    async fn test_statistics_totals_and_keys() {
        let (store, clock) = store_with_clock();
        create_at_next_minute(&store, &clock, "Pothole").await;
        create_at_next_minute(&store, &clock, "Pothole").await;
        let g = create_at_next_minute(&store, &clock, "Garbage").await;
        store
            .update_status(&g, ReportStatus::InProgress)
            .await
            .unwrap();

        let stats = store.statistics().await.unwrap();
        assert_eq!(stats.total, store.count().await.unwrap());
        assert_eq!(stats.by_status.values().sum::<usize>(), stats.total);
        assert_eq!(stats.by_type.get("Pothole"), Some(&2));
        assert_eq!(stats.by_type.get("Garbage"), Some(&1));
        // only observed statuses get a key
        assert!(!stats.by_status.contains_key(&ReportStatus::Resolved));
    }

    #[tokio::test]
    async fn test_recent_count_uses_inclusive_seven_day_window() {
        let (store, clock) = store_with_clock();
        let start = clock.now();

        store
            .create(new_report("Pothole", ReportSeverity::Low))
            .await
            .unwrap();
        clock.advance(ChronoDuration::days(3));
        store
            .create(new_report("Garbage", ReportSeverity::Low))
            .await
            .unwrap();

        // exactly seven days after the first report: both still count
        clock.set(start + ChronoDuration::days(7));
        assert_eq!(store.statistics().await.unwrap().recent_count, 2);

        clock.advance(ChronoDuration::seconds(1));
        assert_eq!(store.statistics().await.unwrap().recent_count, 1);
    }

    #[tokio::test]
    async fn test_clear_resets_store_and_sequence() {
        let (store, clock) = store_with_clock();
        create_at_next_minute(&store, &clock, "Pothole").await;
        create_at_next_minute(&store, &clock, "Garbage").await;

        store.clear().await.unwrap();
        assert_eq!(store.count().await.unwrap(), 0);

        let stats = store.statistics().await.unwrap();
        assert_eq!(stats.total, 0);
        assert!(stats.by_status.is_empty());
        assert!(stats.by_type.is_empty());

        let id = create_at_next_minute(&store, &clock, "Water Leak").await;
        assert_eq!(id, "CR0001");
    }

    #[tokio::test]
    async fn test_mutation_visible_before_delay_elapses() {
        let latency = StoreLatency {
            update_status: Duration::from_millis(200),
            ..StoreLatency::none()
        };
        let store = InMemoryReportStore::new(latency);
        let id = store
            .create(new_report("Pothole", ReportSeverity::High))
            .await
            .unwrap();

        // the update future is polled first and applies its write before sleeping
        let (updated, seen) = tokio::join!(
            store.update_status(&id, ReportStatus::InProgress),
            store.get(&id)
        );
        assert!(updated.unwrap());
        assert_eq!(seen.unwrap().unwrap().status, ReportStatus::InProgress);
    }
}
