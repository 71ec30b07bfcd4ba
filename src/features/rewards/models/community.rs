/// A citizen ranked on the public community board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub name: &'static str,
    pub points: u32,
    pub reports: u32,
    pub badge: &'static str,
}

pub static LEADERBOARD: [LeaderboardEntry; 5] = [
    LeaderboardEntry {
        name: "Rajesh Patel",
        points: 1250,
        reports: 45,
        badge: "Community Champion",
    },
    LeaderboardEntry {
        name: "Priya Sharma",
        points: 980,
        reports: 38,
        badge: "Civic Hero",
    },
    LeaderboardEntry {
        name: "Amit Kumar",
        points: 875,
        reports: 32,
        badge: "Active Reporter",
    },
    LeaderboardEntry {
        name: "Sneha Joshi",
        points: 743,
        reports: 28,
        badge: "Community Helper",
    },
    LeaderboardEntry {
        name: "Vikram Singh",
        points: 692,
        reports: 25,
        badge: "Civic Volunteer",
    },
];

/// Which live counter, if any, is added on top of a milestone baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MilestoneSource {
    Fixed,
    ResolvedReports,
    SubmittedReports,
}

/// City-wide impact figure shown on the community page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommunityMilestone {
    pub label: &'static str,
    pub baseline: u64,
    pub growth: &'static str,
    pub source: MilestoneSource,
}

pub static COMMUNITY_MILESTONES: [CommunityMilestone; 4] = [
    CommunityMilestone {
        label: "Citizens Registered",
        baseline: 2847,
        growth: "+324 this month",
        source: MilestoneSource::Fixed,
    },
    CommunityMilestone {
        label: "Issues Resolved",
        baseline: 1923,
        growth: "+156 this week",
        source: MilestoneSource::ResolvedReports,
    },
    CommunityMilestone {
        label: "Reports Submitted",
        baseline: 3456,
        growth: "+89 today",
        source: MilestoneSource::SubmittedReports,
    },
    CommunityMilestone {
        label: "Rewards Distributed",
        baseline: 4512,
        growth: "+67 this week",
        source: MilestoneSource::Fixed,
    },
];
