mod community;
mod reward;

pub use community::*;
pub use reward::*;
