use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::rewards::models::{LeaderboardEntry, PointsRule, RewardTier};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PointsRuleDto {
    pub action: String,
    pub points: u32,
}

impl From<&PointsRule> for PointsRuleDto {
    fn from(rule: &PointsRule) -> Self {
        Self {
            action: rule.action.to_string(),
            points: rule.points,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RewardTierDto {
    pub level: String,
    pub min_points: u32,
    /// Points needed for the next tier; absent on the top tier
    pub next_tier_at: Option<u32>,
    pub benefits: Vec<String>,
}

impl From<&RewardTier> for RewardTierDto {
    fn from(tier: &RewardTier) -> Self {
        Self {
            level: tier.level.to_string(),
            min_points: tier.min_points,
            next_tier_at: tier.next_tier_at,
            benefits: tier.benefits.iter().map(|b| b.to_string()).collect(),
        }
    }
}

/// How points are earned and what they unlock
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RewardsCatalogDto {
    pub points_system: Vec<PointsRuleDto>,
    pub tiers: Vec<RewardTierDto>,
}

/// Points earned from the reports in the store
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RewardsSummaryDto {
    pub username: String,
    pub total_points: u32,
    pub reports_submitted: usize,
    pub high_priority_reports: usize,
    pub resolved_reports: usize,
    pub current_tier: RewardTierDto,
    /// `None` once the top tier is reached
    pub points_to_next_tier: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardEntryDto {
    /// 1-based position on the board
    pub rank: usize,
    pub name: String,
    pub points: u32,
    pub reports: u32,
    pub badge: String,
}

impl LeaderboardEntryDto {
    pub fn ranked(rank: usize, entry: &LeaderboardEntry) -> Self {
        Self {
            rank,
            name: entry.name.to_string(),
            points: entry.points,
            reports: entry.reports,
            badge: entry.badge.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CommunityMilestoneDto {
    pub label: String,
    pub value: u64,
    /// Short trend label, e.g. "+89 today"
    pub growth: String,
}
