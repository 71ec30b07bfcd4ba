#[cfg(test)]
use crate::features::auth::model::AuthenticatedUser;
#[cfg(test)]
use crate::shared::clock::Clock;

#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};
#[cfg(test)]
use chrono::{DateTime, Duration, TimeZone, Utc};
#[cfg(test)]
use std::sync::Mutex;

#[cfg(test)]
pub fn create_citizen_user() -> AuthenticatedUser {
    AuthenticatedUser {
        username: "admin".to_string(),
        display_name: "admin".to_string(),
    }
}

#[cfg(test)]
async fn inject_citizen_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_citizen_user());
    next.run(request).await
}

#[cfg(test)]
pub fn with_citizen_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_citizen_middleware))
}

/// Clock that only moves when a test tells it to
#[cfg(test)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// 2026-01-01T09:00:00Z, a fixed starting point for store tests
    pub fn starting_at_epoch() -> Self {
        Self::new(Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap())
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }

    pub fn set(&self, to: DateTime<Utc>) {
        *self.now.lock().unwrap() = to;
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}
