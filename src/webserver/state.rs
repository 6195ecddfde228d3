/// Shared application state for the webserver
use std::sync::Arc;

use crate::apis::ApiManager;
use crate::tokenomics::TokenomicsAggregator;

/// Shared application state passed to all route handlers
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<TokenomicsAggregator>,

    /// Provider clients, for request statistics
    pub api_manager: Arc<ApiManager>,

    /// Server startup time
    pub startup_time: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(aggregator: Arc<TokenomicsAggregator>, api_manager: Arc<ApiManager>) -> Self {
        Self {
            aggregator,
            api_manager,
            startup_time: chrono::Utc::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        (chrono::Utc::now() - self.startup_time)
            .num_seconds()
            .max(0) as u64
    }
}
