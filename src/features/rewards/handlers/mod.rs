mod rewards_handler;

pub use rewards_handler::*;
