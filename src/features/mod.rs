pub mod auth;
pub mod dashboard;
pub mod reports;
pub mod rewards;
