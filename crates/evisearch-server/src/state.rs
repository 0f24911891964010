//! Shared application state

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::rate_limit::RateLimiter;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let limiter = RateLimiter::new(
            Duration::from_secs(config.rate_limit.window_secs),
            config.rate_limit.max_requests,
        );
        Self {
            config: Arc::new(config),
            limiter: Arc::new(limiter),
        }
    }
}
