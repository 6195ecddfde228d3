/// Shared HTTP plumbing for provider clients: rate limiting, timeouts,
/// status mapping and request statistics
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, OwnedSemaphorePermit, Semaphore};

use super::error::ApiError;
use super::stats::ApiStatsTracker;
use crate::logger::{self, LogTag};

/// Spaces requests so a client never exceeds `max_per_minute`
pub struct RateLimiter {
    semaphore: Arc<Semaphore>,
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
    max_per_minute: usize,
}

impl RateLimiter {
    /// `0` disables spacing
    pub fn new(max_per_minute: usize) -> Self {
        let min_interval = if max_per_minute > 0 {
            Duration::from_secs_f64(60.0 / max_per_minute as f64)
        } else {
            Duration::ZERO
        };

        Self {
            semaphore: Arc::new(Semaphore::new(1)),
            last_request: Mutex::new(None),
            min_interval,
            max_per_minute,
        }
    }

    /// Wait for the next request slot
    pub async fn acquire(&self) -> Result<RateLimitGuard, String> {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| format!("Failed to acquire rate limiter permit: {}", e))?;

        if !self.min_interval.is_zero() {
            let mut last = self.last_request.lock().await;
            if let Some(last_time) = *last {
                let elapsed = last_time.elapsed();
                if elapsed < self.min_interval {
                    tokio::time::sleep(self.min_interval - elapsed).await;
                }
            }
            *last = Some(Instant::now());
        }

        Ok(RateLimitGuard { _permit: permit })
    }

    pub fn max_per_minute(&self) -> usize {
        self.max_per_minute
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

/// Held for the duration of one request
pub struct RateLimitGuard {
    _permit: OwnedSemaphorePermit,
}

/// HTTP client bound to one provider
pub struct HttpClient {
    provider: &'static str,
    client: Client,
    timeout: Duration,
    limiter: RateLimiter,
    stats: Arc<ApiStatsTracker>,
}

impl HttpClient {
    pub fn new(
        provider: &'static str,
        timeout_secs: u64,
        rate_limit_per_minute: usize,
    ) -> Result<Self, String> {
        if timeout_secs == 0 {
            return Err("Timeout must be greater than zero".to_string());
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            provider,
            client,
            timeout: Duration::from_secs(timeout_secs),
            limiter: RateLimiter::new(rate_limit_per_minute),
            stats: Arc::new(ApiStatsTracker::new()),
        })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn stats(&self) -> Arc<ApiStatsTracker> {
        self.stats.clone()
    }

    /// Send `builder`, map the status and decode a JSON body
    ///
    /// Every outcome is recorded in the provider's statistics.
    pub async fn get_json<T>(&self, endpoint: &str, builder: RequestBuilder) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let guard = self
            .limiter
            .acquire()
            .await
            .map_err(ApiError::NetworkError)?;

        let start = Instant::now();
        let result = builder.timeout(self.timeout).send().await;
        drop(guard);
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                let err = ApiError::from(err);
                return Err(self.fail(endpoint, elapsed_ms, err).await);
            }
        };

        let status = response.status();
        if !status.is_success() {
            return Err(self.fail(endpoint, elapsed_ms, ApiError::from_status(status)).await);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                let err = ApiError::from(err);
                return Err(self.fail(endpoint, elapsed_ms, err).await);
            }
        };

        match serde_json::from_str::<T>(&body) {
            Ok(value) => {
                self.stats.record_request(true, elapsed_ms).await;
                logger::debug(
                    LogTag::Api,
                    &format!(
                        "[{}] {} succeeded in {:.0}ms",
                        self.provider.to_uppercase(),
                        endpoint,
                        elapsed_ms
                    ),
                );
                logger::verbose(LogTag::Api, &format!("[{}] body: {}", self.provider.to_uppercase(), body));
                Ok(value)
            }
            Err(e) => {
                let err = ApiError::InvalidResponse(format!("Parse error: {}", e));
                Err(self.fail(endpoint, elapsed_ms, err).await)
            }
        }
    }

    /// Count a request the caller stopped waiting for as a timed-out failure
    pub async fn record_abandoned(&self, endpoint: &str, waited: Duration) {
        let elapsed_ms = waited.as_secs_f64() * 1000.0;
        self.fail(endpoint, elapsed_ms, ApiError::Timeout).await;
    }

    async fn fail(&self, endpoint: &str, elapsed_ms: f64, err: ApiError) -> ApiError {
        self.stats.record_request(false, elapsed_ms).await;
        self.stats
            .record_error(self.provider, endpoint, err.to_string())
            .await;
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limiter_interval() {
        assert_eq!(RateLimiter::new(60).min_interval(), Duration::from_secs(1));
        assert_eq!(RateLimiter::new(0).min_interval(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_rate_limiter_spacing() {
        let limiter = RateLimiter::new(600);
        let start = Instant::now();
        drop(limiter.acquire().await.unwrap());
        drop(limiter.acquire().await.unwrap());
        assert!(start.elapsed() >= Duration::from_millis(100));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(HttpClient::new("moralis", 0, 60).is_err());
    }
}
