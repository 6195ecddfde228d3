/// Per-provider request statistics
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::logger::{self, LogTag};

/// Snapshot of one provider's request counters
#[derive(Debug, Clone, Default, Serialize)]
pub struct ApiStats {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub average_response_time_ms: f64,
    pub last_error: Option<String>,
    pub last_request_time: Option<DateTime<Utc>>,
}

impl ApiStats {
    pub fn success_rate(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            self.successful_requests as f64 / self.total_requests as f64 * 100.0
        }
    }
}

#[derive(Debug, Default)]
pub struct ApiStatsTracker {
    stats: RwLock<ApiStats>,
}

impl ApiStatsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record_request(&self, success: bool, elapsed_ms: f64) {
        let mut stats = self.stats.write().await;
        stats.total_requests += 1;
        if success {
            stats.successful_requests += 1;
        } else {
            stats.failed_requests += 1;
        }

        let n = stats.total_requests as f64;
        stats.average_response_time_ms = (stats.average_response_time_ms * (n - 1.0) + elapsed_ms) / n;
        stats.last_request_time = Some(Utc::now());
    }

    /// Remember the latest failure and log it
    pub async fn record_error(&self, provider: &str, endpoint: &str, message: String) {
        logger::warning(
            LogTag::Api,
            &format!("[{}] {} failed: {}", provider.to_uppercase(), endpoint, message),
        );
        self.stats.write().await.last_error = Some(message);
    }

    pub async fn get_stats(&self) -> ApiStats {
        self.stats.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_counters_and_average() {
        let tracker = ApiStatsTracker::new();
        tracker.record_request(true, 100.0).await;
        tracker.record_request(false, 300.0).await;
        tracker
            .record_error("birdeye", "market-data", "HTTP 500".to_string())
            .await;

        let stats = tracker.get_stats().await;
        assert_eq!(stats.total_requests, 2);
        assert_eq!(stats.successful_requests, 1);
        assert_eq!(stats.failed_requests, 1);
        assert_eq!(stats.average_response_time_ms, 200.0);
        assert_eq!(stats.success_rate(), 50.0);
        assert_eq!(stats.last_error.as_deref(), Some("HTTP 500"));
        assert!(stats.last_request_time.is_some());
    }
}
