use super::ReportRepository;
use crate::core::error::Result;
use crate::features::reports::models::{
    NewCivicReport, Photo, ReportLocation, ReportSeverity, ReportStatus,
};

fn demo_reports() -> Vec<NewCivicReport> {
    vec![
        NewCivicReport {
            issue_type: "Pothole".to_string(),
            description: "Large pothole on RC Dutt Road causing traffic issues".to_string(),
            photo: Photo::placeholder("demo-pothole.jpg"),
            location: ReportLocation {
                latitude: 22.3072,
                longitude: 73.1812,
                address: "RC Dutt Road, Vadodara".to_string(),
            },
            status: ReportStatus::Reported,
            severity: ReportSeverity::High,
        },
        NewCivicReport {
            issue_type: "Garbage".to_string(),
            description: "Overflowing garbage bins near Alkapuri market".to_string(),
            photo: Photo::placeholder("demo-garbage.jpg"),
            location: ReportLocation {
                latitude: 22.2957,
                longitude: 73.2084,
                address: "Alkapuri Market, Vadodara".to_string(),
            },
            status: ReportStatus::InProgress,
            severity: ReportSeverity::Medium,
        },
        NewCivicReport {
            issue_type: "Street Light".to_string(),
            description: "Broken streetlight on Sayajigunj main road".to_string(),
            photo: Photo::placeholder("demo-streetlight.jpg"),
            location: ReportLocation {
                latitude: 22.3178,
                longitude: 73.1896,
                address: "Sayajigunj Main Road, Vadodara".to_string(),
            },
            status: ReportStatus::Resolved,
            severity: ReportSeverity::Low,
        },
    ]
}

/// Insert the Vadodara demonstration reports, returning their ids
pub async fn seed_demo_reports(repository: &dyn ReportRepository) -> Result<Vec<String>> {
    let mut ids = Vec::new();
    for report in demo_reports() {
        ids.push(repository.create(report).await?);
    }
    tracing::info!("Seeded {} demo reports", ids.len());
    Ok(ids)
}
