mod rewards_dto;

pub use rewards_dto::*;
