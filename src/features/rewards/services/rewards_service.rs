use std::sync::Arc;

use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::reports::models::{CivicReport, ReportSeverity, ReportStatus};
use crate::features::reports::services::{ReportFilter, ReportService};
use crate::features::rewards::dtos::{
    CommunityMilestoneDto, LeaderboardEntryDto, PointsRuleDto, RewardTierDto,
    RewardsCatalogDto, RewardsSummaryDto,
};
use crate::features::rewards::models::{
    tier_for, MilestoneSource, COMMUNITY_MILESTONES, HIGH_PRIORITY_POINTS, LEADERBOARD,
    PHOTO_REPORT_POINTS, POINTS_SYSTEM, RESOLUTION_POINTS, REWARD_TIERS,
};

pub struct RewardsService {
    report_service: Arc<ReportService>,
}

impl RewardsService {
    pub fn new(report_service: Arc<ReportService>) -> Self {
        Self { report_service }
    }

    pub fn catalog(&self) -> RewardsCatalogDto {
        RewardsCatalogDto {
            points_system: POINTS_SYSTEM.iter().map(PointsRuleDto::from).collect(),
            tiers: REWARD_TIERS.iter().map(RewardTierDto::from).collect(),
        }
    }

    /// Top citizens, highest points first
    pub fn leaderboard(&self) -> Vec<LeaderboardEntryDto> {
        LEADERBOARD
            .iter()
            .enumerate()
            .map(|(index, entry)| LeaderboardEntryDto::ranked(index + 1, entry))
            .collect()
    }

    /// City-wide figures; report-backed ones include what this store holds
    pub async fn milestones(&self) -> Result<Vec<CommunityMilestoneDto>> {
        let stats = self.report_service.statistics().await?;

        Ok(COMMUNITY_MILESTONES
            .iter()
            .map(|milestone| {
                let live = match milestone.source {
                    MilestoneSource::Fixed => 0,
                    MilestoneSource::ResolvedReports => stats.status_count(ReportStatus::Resolved),
                    MilestoneSource::SubmittedReports => stats.total,
                };
                CommunityMilestoneDto {
                    label: milestone.label.to_string(),
                    value: milestone.baseline + live as u64,
                    growth: milestone.growth.to_string(),
                }
            })
            .collect())
    }

    /// Reports carry no owner, so every stored report counts toward the signed-in citizen
    pub async fn summary(&self, user: &AuthenticatedUser) -> Result<RewardsSummaryDto> {
        let reports = self.report_service.list(&ReportFilter::default()).await?;
        Ok(summarize(&user.username, &reports))
    }
}

fn summarize(username: &str, reports: &[CivicReport]) -> RewardsSummaryDto {
    let high_priority_reports = reports
        .iter()
        .filter(|r| r.severity == ReportSeverity::High)
        .count();
    let resolved_reports = reports
        .iter()
        .filter(|r| r.status == ReportStatus::Resolved)
        .count();

    let total_points = reports.len() as u32 * PHOTO_REPORT_POINTS
        + high_priority_reports as u32 * HIGH_PRIORITY_POINTS
        + resolved_reports as u32 * RESOLUTION_POINTS;

    let tier = tier_for(total_points);

    RewardsSummaryDto {
        username: username.to_string(),
        total_points,
        reports_submitted: reports.len(),
        high_priority_reports,
        resolved_reports,
        current_tier: tier.into(),
        points_to_next_tier: tier.next_tier_at.map(|next| next - total_points),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::repository::{
        seed_demo_reports, InMemoryReportStore, StoreLatency,
    };
    use crate::shared::test_helpers::create_citizen_user;

    #[test]
    fn test_catalog_lists_every_rule_and_tier() {
        let store = Arc::new(InMemoryReportStore::new(StoreLatency::none()));
        let service = RewardsService::new(Arc::new(ReportService::new(store, 1024)));

        let catalog = service.catalog();
        assert_eq!(catalog.points_system.len(), 6);
        assert_eq!(catalog.points_system[0].points, 10);
        assert_eq!(catalog.tiers.len(), 4);
        assert_eq!(catalog.tiers[3].level, "Urban Legend");
        assert!(catalog.tiers[3].next_tier_at.is_none());
    }

    #[tokio::test]
    async fn test_summary_scores_seeded_reports() {
        let store = Arc::new(InMemoryReportStore::new(StoreLatency::none()));
        seed_demo_reports(store.as_ref()).await.unwrap();
        let service = RewardsService::new(Arc::new(ReportService::new(store, 1024)));

        let summary = service.summary(&create_citizen_user()).await.unwrap();

        // 3 reports, one high severity, one resolved
        assert_eq!(summary.total_points, 3 * 10 + 25 + 15);
        assert_eq!(summary.reports_submitted, 3);
        assert_eq!(summary.high_priority_reports, 1);
        assert_eq!(summary.resolved_reports, 1);
        assert_eq!(summary.current_tier.level, "Community Helper");
        assert_eq!(summary.points_to_next_tier, Some(30));
        assert_eq!(summary.username, "admin");
    }

    #[test]
    fn test_leaderboard_is_ranked_from_one() {
        let store = Arc::new(InMemoryReportStore::new(StoreLatency::none()));
        let service = RewardsService::new(Arc::new(ReportService::new(store, 1024)));

        let board = service.leaderboard();
        assert_eq!(board.len(), 5);
        assert_eq!(board[0].rank, 1);
        assert_eq!(board[0].name, "Rajesh Patel");
        assert_eq!(board[0].badge, "Community Champion");
        assert_eq!(board[4].rank, 5);
    }

    #[tokio::test]
    async fn test_milestones_add_live_report_counts() {
        let store = Arc::new(InMemoryReportStore::new(StoreLatency::none()));
        seed_demo_reports(store.as_ref()).await.unwrap();
        let service = RewardsService::new(Arc::new(ReportService::new(store, 1024)));

        let milestones = service.milestones().await.unwrap();
        let value = |label: &str| {
            milestones
                .iter()
                .find(|m| m.label == label)
                .map(|m| m.value)
                .unwrap()
        };
        assert_eq!(value("Citizens Registered"), 2847);
        assert_eq!(value("Issues Resolved"), 1923 + 1);
        assert_eq!(value("Reports Submitted"), 3456 + 3);
        assert_eq!(value("Rewards Distributed"), 4512);
    }

    #[test]
    fn test_empty_summary_starts_at_first_tier() {
        let summary = summarize("admin", &[]);
        assert_eq!(summary.total_points, 0);
        assert_eq!(summary.current_tier.level, "Community Helper");
        assert_eq!(summary.points_to_next_tier, Some(100));
    }
}
