use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::reports::{
    dtos as reports_dtos, handlers as reports_handlers, models as reports_models,
};
use crate::features::rewards::{dtos as rewards_dtos, handlers as rewards_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::sign_in,
        auth::handlers::sign_out,
        auth::handlers::get_me,
        // Locations
        reports_handlers::resolve_location,
        // Reports
        reports_handlers::submit_report,
        reports_handlers::list_reports,
        reports_handlers::get_report,
        reports_handlers::get_report_photo,
        reports_handlers::update_report_status,
        reports_handlers::reset_reports,
        // Dashboard (public)
        dashboard_handlers::get_statistics,
        dashboard_handlers::get_map,
        // Rewards
        rewards_handlers::get_catalog,
        rewards_handlers::get_leaderboard,
        rewards_handlers::get_milestones,
        rewards_handlers::get_summary,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth::model::AuthenticatedUser,
            auth::dtos::SignInRequestDto,
            auth::dtos::AuthResponseDto,
            auth::dtos::AuthUserDto,
            ApiResponse<auth::dtos::AuthResponseDto>,
            ApiResponse<auth::dtos::AuthUserDto>,
            // Reports
            reports_models::ReportStatus,
            reports_models::ReportSeverity,
            reports_models::ReportLocation,
            reports_models::ReportStatistics,
            reports_models::LocationInput,
            reports_models::LocationFailure,
            reports_models::LocationSource,
            reports_models::ResolvedLocation,
            reports_dtos::PhotoResponseDto,
            reports_dtos::ReportResponseDto,
            reports_dtos::UpdateReportStatusDto,
            reports_dtos::SubmitReportForm,
            ApiResponse<Vec<reports_dtos::ReportResponseDto>>,
            ApiResponse<reports_dtos::ReportResponseDto>,
            ApiResponse<reports_models::ResolvedLocation>,
            // Dashboard (public)
            dashboard_dtos::MapReportMarker,
            dashboard_dtos::MapStatusCounts,
            dashboard_dtos::DashboardMapDto,
            ApiResponse<reports_models::ReportStatistics>,
            ApiResponse<dashboard_dtos::DashboardMapDto>,
            // Rewards
            rewards_dtos::PointsRuleDto,
            rewards_dtos::RewardTierDto,
            rewards_dtos::RewardsCatalogDto,
            rewards_dtos::RewardsSummaryDto,
            rewards_dtos::LeaderboardEntryDto,
            rewards_dtos::CommunityMilestoneDto,
            ApiResponse<rewards_dtos::RewardsCatalogDto>,
            ApiResponse<rewards_dtos::RewardsSummaryDto>,
        )
    ),
    tags(
        (name = "auth", description = "Demo sign-in and session endpoints"),
        (name = "locations", description = "Resolve GPS fixes, manual addresses and location failures"),
        (name = "reports", description = "Civic issue reports and their status lifecycle"),
        (name = "Dashboard", description = "Public statistics and map for civic reports"),
        (name = "rewards", description = "Citizen points, reward tiers and community leaderboard"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Nagar Seva API",
        version = "0.1.0",
        description = "API documentation for Nagar Seva civic issue reporting",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_documents_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/auth/sign-in",
            "/api/auth/sign-out",
            "/api/auth/me",
            "/api/locations/resolve",
            "/api/reports",
            "/api/reports/{id}",
            "/api/reports/{id}/photo",
            "/api/reports/{id}/status",
            "/api/dashboard/statistics",
            "/api/dashboard/map",
            "/api/rewards/catalog",
            "/api/rewards/leaderboard",
            "/api/rewards/milestones",
            "/api/rewards/summary",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
