/// Points for a report submitted with a photo
pub const PHOTO_REPORT_POINTS: u32 = 10;
/// Bonus when a report is confirmed resolved
pub const RESOLUTION_POINTS: u32 = 15;
/// Bonus for reporting a high-severity issue
pub const HIGH_PRIORITY_POINTS: u32 = 25;

/// A way citizens earn points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointsRule {
    pub action: &'static str,
    pub points: u32,
}

pub static POINTS_SYSTEM: [PointsRule; 6] = [
    PointsRule {
        action: "Photo report submission",
        points: PHOTO_REPORT_POINTS,
    },
    PointsRule {
        action: "Issue resolution verification",
        points: RESOLUTION_POINTS,
    },
    PointsRule {
        action: "Community validation",
        points: 5,
    },
    PointsRule {
        action: "High-priority issue report",
        points: HIGH_PRIORITY_POINTS,
    },
    PointsRule {
        action: "Follow-up documentation",
        points: 8,
    },
    PointsRule {
        action: "Monthly consistency bonus",
        points: 50,
    },
];

/// Recognition level unlocked by accumulated points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardTier {
    pub level: &'static str,
    pub min_points: u32,
    /// Exclusive upper bound; `None` for the top tier
    pub next_tier_at: Option<u32>,
    pub benefits: &'static [&'static str],
}

pub static REWARD_TIERS: [RewardTier; 4] = [
    RewardTier {
        level: "Community Helper",
        min_points: 0,
        next_tier_at: Some(100),
        benefits: &[
            "Digital badge on profile",
            "Monthly newsletter access",
            "Basic reporting features",
        ],
    },
    RewardTier {
        level: "Civic Champion",
        min_points: 100,
        next_tier_at: Some(500),
        benefits: &[
            "Priority report processing",
            "Exclusive community events",
            "Advanced analytics dashboard",
            "Custom profile themes",
        ],
    },
    RewardTier {
        level: "City Guardian",
        min_points: 500,
        next_tier_at: Some(1000),
        benefits: &[
            "Monthly city hall recognition",
            "Direct line to department heads",
            "Beta feature access",
            "Annual appreciation dinner",
        ],
    },
    RewardTier {
        level: "Urban Legend",
        min_points: 1000,
        next_tier_at: None,
        benefits: &[
            "Lifetime achievement award",
            "Advisory board invitation",
            "Mentorship opportunities",
            "Legacy hall of fame entry",
        ],
    },
];

/// Highest tier whose threshold `points` has reached
pub fn tier_for(points: u32) -> &'static RewardTier {
    REWARD_TIERS
        .iter()
        .rev()
        .find(|tier| points >= tier.min_points)
        .unwrap_or(&REWARD_TIERS[0])
}
