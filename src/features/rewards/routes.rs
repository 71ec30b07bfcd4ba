use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::rewards::handlers;
use crate::features::rewards::services::RewardsService;

/// Public rewards routes
pub fn public_routes(service: Arc<RewardsService>) -> Router {
    Router::new()
        .route("/api/rewards/catalog", get(handlers::get_catalog))
        .route("/api/rewards/leaderboard", get(handlers::get_leaderboard))
        .route("/api/rewards/milestones", get(handlers::get_milestones))
        .with_state(service)
}

/// Rewards routes for signed-in citizens
pub fn protected_routes(service: Arc<RewardsService>) -> Router {
    Router::new()
        .route("/api/rewards/summary", get(handlers::get_summary))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::repository::{InMemoryReportStore, StoreLatency};
    use crate::features::reports::services::ReportService;
    use crate::shared::test_helpers::with_citizen_auth;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::Value;

    fn service() -> Arc<RewardsService> {
        let store = Arc::new(InMemoryReportStore::new(StoreLatency::none()));
        Arc::new(RewardsService::new(Arc::new(ReportService::new(store, 1024))))
    }

    #[tokio::test]
    async fn test_catalog_is_public() {
        let server = TestServer::new(public_routes(service())).unwrap();
        let body: Value = server.get("/api/rewards/catalog").await.json();
        assert_eq!(body["data"]["tiers"][1]["level"], "Civic Champion");
        assert_eq!(body["data"]["points_system"][3]["points"], 25);
    }

    #[tokio::test]
    async fn test_leaderboard_and_milestones_are_public() {
        let server = TestServer::new(public_routes(service())).unwrap();

        let response = server.get("/api/rewards/leaderboard").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"][0]["rank"], 1);
        assert_eq!(body["data"][0]["name"], "Rajesh Patel");
        assert_eq!(body["data"][0]["points"], 1250);
        assert_eq!(body["data"][0]["reports"], 45);
        assert_eq!(body["data"][1]["badge"], "Civic Hero");

        let response = server.get("/api/rewards/milestones").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"][2]["label"], "Reports Submitted");
        assert_eq!(body["data"][2]["value"], 3456);
    }

    #[tokio::test]
    async fn test_summary_needs_user() {
        let server = TestServer::new(protected_routes(service())).unwrap();
        server
            .get("/api/rewards/summary")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        let server = TestServer::new(with_citizen_auth(protected_routes(service()))).unwrap();
        let body: Value = server.get("/api/rewards/summary").await.json();
        assert_eq!(body["data"]["total_points"], 0);
        assert_eq!(body["data"]["username"], "admin");
    }
}
