pub mod clients;
pub mod dtos;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod services;

pub use clients::{AuthClient, DemoAuthClient};
pub use services::{AuthService, TokenService};
