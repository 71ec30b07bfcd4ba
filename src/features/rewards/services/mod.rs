mod rewards_service;

pub use rewards_service::RewardsService;
