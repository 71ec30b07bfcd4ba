use axum::{extract::State, Json};
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::rewards::dtos::{
    CommunityMilestoneDto, LeaderboardEntryDto, RewardsCatalogDto, RewardsSummaryDto,
};
use crate::features::rewards::services::RewardsService;
use crate::shared::types::ApiResponse;

/// Points system and reward tiers
#[utoipa::path(
    get,
    path = "/api/rewards/catalog",
    responses(
        (status = 200, description = "Rewards catalog", body = ApiResponse<RewardsCatalogDto>)
    ),
    tag = "rewards"
)]
pub async fn get_catalog(
    State(service): State<Arc<RewardsService>>,
) -> Json<ApiResponse<RewardsCatalogDto>> {
    Json(ApiResponse::success(Some(service.catalog()), None, None))
}

/// Community leaderboard
#[utoipa::path(
    get,
    path = "/api/rewards/leaderboard",
    responses(
        (status = 200, description = "Top citizens by points", body = ApiResponse<Vec<LeaderboardEntryDto>>)
    ),
    tag = "rewards"
)]
pub async fn get_leaderboard(
    State(service): State<Arc<RewardsService>>,
) -> Json<ApiResponse<Vec<LeaderboardEntryDto>>> {
    Json(ApiResponse::success(Some(service.leaderboard()), None, None))
}

/// Community impact milestones
#[utoipa::path(
    get,
    path = "/api/rewards/milestones",
    responses(
        (status = 200, description = "City-wide impact figures", body = ApiResponse<Vec<CommunityMilestoneDto>>)
    ),
    tag = "rewards"
)]
pub async fn get_milestones(
    State(service): State<Arc<RewardsService>>,
) -> Result<Json<ApiResponse<Vec<CommunityMilestoneDto>>>> {
    let milestones = service.milestones().await?;
    Ok(Json(ApiResponse::success(Some(milestones), None, None)))
}

/// Points earned by the signed-in citizen
#[utoipa::path(
    get,
    path = "/api/rewards/summary",
    responses(
        (status = 200, description = "Points summary", body = ApiResponse<RewardsSummaryDto>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "rewards"
)]
pub async fn get_summary(
    user: AuthenticatedUser,
    State(service): State<Arc<RewardsService>>,
) -> Result<Json<ApiResponse<RewardsSummaryDto>>> {
    let summary = service.summary(&user).await?;
    Ok(Json(ApiResponse::success(Some(summary), None, None)))
}
