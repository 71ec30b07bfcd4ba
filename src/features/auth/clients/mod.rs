mod demo_auth_client;

pub use demo_auth_client::{AuthClient, DemoAuthClient};
