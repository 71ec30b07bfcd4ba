use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::time::interval;

use crate::core::error::{AppError, Result};
use crate::features::reports::models::ReportStatus;
use crate::features::reports::services::{ReportFilter, ReportService};

/// Chance that a `reported` report is looked at during a tick
const PICK_REPORTED_PROBABILITY: f64 = 0.1;

/// Chance that a picked `reported` report moves to `in-progress`
const START_WORK_PROBABILITY: f64 = 0.7;

/// Chance that an `in-progress` report is resolved during a tick
const RESOLVE_PROBABILITY: f64 = 0.15;

/// Source of uniform rolls in `[0, 1)`
pub trait Dice: Send + Sync {
    fn roll(&self) -> f64;
}

/// Dice backed by the thread-local RNG
pub struct RandomDice;

impl Dice for RandomDice {
    fn roll(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Background worker that nudges reports forward as a municipality would
pub struct ProgressSimulator {
    report_service: Arc<ReportService>,
    dice: Arc<dyn Dice>,
    period: Duration,
}

impl ProgressSimulator {
    pub fn new(report_service: Arc<ReportService>, dice: Arc<dyn Dice>, period: Duration) -> Self {
        Self {
            report_service,
            dice,
            period,
        }
    }

    /// Run the simulator in a background loop
    pub async fn run(&self) {
        tracing::info!("Starting progress simulator (every {:?})", self.period);

        let mut interval = interval(self.period);
        // First tick completes immediately
        interval.tick().await;

        loop {
            interval.tick().await;

            match self.tick().await {
                Ok(0) => {}
                Ok(advanced) => tracing::info!("Progress simulator advanced {} reports", advanced),
                Err(e) => tracing::error!("Error simulating report progress: {:?}", e),
            }
        }
    }

    /// One simulation round; returns how many reports moved
    pub async fn tick(&self) -> Result<usize> {
        // Snapshot both buckets first so no report moves twice in one round
        let reported = self.reports_with(ReportStatus::Reported).await?;
        let in_progress = self.reports_with(ReportStatus::InProgress).await?;

        let mut advanced = 0;

        for id in reported {
            if self.dice.roll() < PICK_REPORTED_PROBABILITY
                && self.dice.roll() < START_WORK_PROBABILITY
                && self.advance(&id, ReportStatus::InProgress).await?
            {
                advanced += 1;
            }
        }

        for id in in_progress {
            if self.dice.roll() < RESOLVE_PROBABILITY
                && self.advance(&id, ReportStatus::Resolved).await?
            {
                advanced += 1;
            }
        }

        Ok(advanced)
    }

    async fn reports_with(&self, status: ReportStatus) -> Result<Vec<String>> {
        let filter = ReportFilter {
            status: Some(status),
            issue_type: None,
        };
        let reports = self.report_service.list(&filter).await?;
        Ok(reports.into_iter().map(|r| r.id).collect())
    }

    /// Reports changed or removed since the snapshot are skipped
    async fn advance(&self, id: &str, next: ReportStatus) -> Result<bool> {
        match self.report_service.advance_status(id, next).await {
            Ok(_) => Ok(true),
            Err(AppError::Conflict(_)) | Err(AppError::NotFound(_)) => {
                tracing::debug!("Skipping report {} during progress simulation", id);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::models::{Photo, ReportLocation};
    use crate::features::reports::repository::{InMemoryReportStore, StoreLatency};
    use crate::features::reports::services::SubmitReport;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays scripted rolls, then keeps returning the last fallback
    struct ScriptedDice {
        rolls: Mutex<VecDeque<f64>>,
        fallback: f64,
    }

    impl ScriptedDice {
        fn new(rolls: &[f64], fallback: f64) -> Self {
            Self {
                rolls: Mutex::new(rolls.iter().copied().collect()),
                fallback,
            }
        }
    }

    impl Dice for ScriptedDice {
        fn roll(&self) -> f64 {
            self.rolls.lock().unwrap().pop_front().unwrap_or(self.fallback)
        }
    }

    async fn service_with_reports(count: usize) -> Arc<ReportService> {
        let service = Arc::new(ReportService::new(
            Arc::new(InMemoryReportStore::new(StoreLatency::none())),
            1024,
        ));
        for i in 0..count {
            service
                .submit(SubmitReport {
                    issue_type: Some("Streetlight".to_string()),
                    description: Some(format!("Broken light #{}", i)),
                    severity: None,
                    location: Some(ReportLocation {
                        latitude: 22.3,
                        longitude: 73.2,
                        address: "Alkapuri, Vadodara".to_string(),
                    }),
                    photo: Some(Photo::placeholder("streetlight.jpg")),
                })
                .await
                .unwrap();
        }
        service
    }

    fn simulator(service: Arc<ReportService>, dice: ScriptedDice) -> ProgressSimulator {
        ProgressSimulator::new(service, Arc::new(dice), Duration::from_secs(30))
    }

    #[test]
    fn test_random_dice_stays_in_unit_interval() {
        let dice = RandomDice;
        for _ in 0..1000 {
            let roll = dice.roll();
            assert!((0.0..1.0).contains(&roll));
        }
    }

    #[tokio::test]
    async fn test_high_rolls_leave_reports_untouched() {
        let service = service_with_reports(3).await;
        let advanced = simulator(service.clone(), ScriptedDice::new(&[], 0.99))
            .tick()
            .await
            .unwrap();

        assert_eq!(advanced, 0);
        let stats = service.statistics().await.unwrap();
        assert_eq!(stats.status_count(ReportStatus::Reported), 3);
    }

    #[tokio::test]
    async fn test_picked_report_needs_both_rolls() {
        let service = service_with_reports(2).await;
        // Newest first: CR0002 picked but fails the second roll, CR0001 passes both
        let dice = ScriptedDice::new(&[0.05, 0.9, 0.05, 0.5], 0.99);
        let advanced = simulator(service.clone(), dice).tick().await.unwrap();

        assert_eq!(advanced, 1);
        assert_eq!(
            service.get("CR0001").await.unwrap().status,
            ReportStatus::InProgress
        );
        assert_eq!(
            service.get("CR0002").await.unwrap().status,
            ReportStatus::Reported
        );
    }

    #[tokio::test]
    async fn test_report_moves_one_step_per_tick() {
        let service = service_with_reports(1).await;
        let simulator = simulator(service.clone(), ScriptedDice::new(&[], 0.0));

        assert_eq!(simulator.tick().await.unwrap(), 1);
        assert_eq!(
            service.get("CR0001").await.unwrap().status,
            ReportStatus::InProgress
        );

        assert_eq!(simulator.tick().await.unwrap(), 1);
        assert_eq!(
            service.get("CR0001").await.unwrap().status,
            ReportStatus::Resolved
        );

        assert_eq!(simulator.tick().await.unwrap(), 0);
    }
}
