/// Records stored by the cache manager and the reports derived from them
use serde::{Deserialize, Serialize};

use super::store::ServerInfo;

/// Metadata attached to every record written through the cache manager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheInfo {
    /// Where the record came from when it was written ("api")
    pub source: String,
    /// RFC 3339 timestamp of the write
    pub cached_at: String,
    pub namespace: String,
    /// Seconds spent serving the request that returned this record.
    /// Stamped at read time; absent in freshly written records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time: Option<f64>,
}

/// Values that can be stored through [`super::CacheManager::write`]
pub trait Cacheable: Serialize + serde::de::DeserializeOwned + Send + Sync {
    fn cache_info_mut(&mut self) -> &mut Option<CacheInfo>;
}

/// Per-identifier access statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CacheStatsRecord {
    pub hits: u64,
    pub misses: u64,
    pub total_requests: u64,
    /// Running mean of lookup latency in seconds
    pub avg_response_time: f64,
    pub last_updated: Option<String>,
}

impl CacheStatsRecord {
    /// Fold one access into the counters
    pub fn record(&mut self, was_hit: bool, elapsed_seconds: f64, stamped_at: &str) {
        self.total_requests += 1;
        if was_hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }

        let n = self.total_requests as f64;
        self.avg_response_time = (self.avg_response_time * (n - 1.0) + elapsed_seconds) / n;
        self.last_updated = Some(stamped_at.to_string());
    }
}

/// Hit-rate summary for one identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HitRate {
    pub hit_rate_percent: f64,
    pub total_requests: u64,
    pub hits: u64,
    pub misses: u64,
    pub avg_response_time_seconds: f64,
    pub last_updated: Option<String>,
}

impl HitRate {
    pub fn from_stats(stats: &CacheStatsRecord) -> Self {
        Self {
            hit_rate_percent: hit_rate_percent(stats.hits, stats.total_requests),
            total_requests: stats.total_requests,
            hits: stats.hits,
            misses: stats.misses,
            avg_response_time_seconds: round_to(stats.avg_response_time, 3),
            last_updated: stats.last_updated.clone(),
        }
    }
}

/// Hit rate, or the backend error that prevented computing it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HitRateReport {
    Stats(HitRate),
    Error { error: String },
}

/// Combined diagnostic view served by the cache endpoints
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceReport {
    pub server_info: ServerInfo,
    pub hit_rate: HitRateReport,
    pub identifier: String,
    pub data_key: String,
    pub stats_key: String,
    pub namespace: String,
}

/// `round(100 * hits / total, 2)`, or 0.0 when nothing was recorded
pub fn hit_rate_percent(hits: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_to(100.0 * hits as f64 / total as f64, 2)
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_mean() {
        let mut stats = CacheStatsRecord::default();
        stats.record(false, 0.3, "t1");
        stats.record(true, 0.1, "t2");
        stats.record(true, 0.2, "t3");

        assert_eq!(stats.total_requests, 3);
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert!((stats.avg_response_time - 0.2).abs() < 1e-9);
        assert_eq!(stats.last_updated.as_deref(), Some("t3"));
    }

    #[test]
    fn test_hit_rate_rounding() {
        assert_eq!(hit_rate_percent(0, 0), 0.0);
        assert_eq!(hit_rate_percent(1, 3), 33.33);
        assert_eq!(hit_rate_percent(2, 3), 66.67);
        assert_eq!(hit_rate_percent(5, 5), 100.0);
    }

    #[test]
    fn test_hit_rate_from_stats() {
        let stats = CacheStatsRecord {
            hits: 1,
            misses: 1,
            total_requests: 2,
            avg_response_time: 0.123456,
            last_updated: Some("2024-01-01T00:00:00Z".to_string()),
        };

        let rate = HitRate::from_stats(&stats);
        assert_eq!(rate.hit_rate_percent, 50.0);
        assert_eq!(rate.avg_response_time_seconds, 0.123);
    }

    #[test]
    fn test_error_report_shape() {
        let report = HitRateReport::Error {
            error: "cache command failed: boom".to_string(),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json, serde_json::json!({"error": "cache command failed: boom"}));
    }
}
