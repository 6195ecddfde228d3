/// Birdeye public API client
///
/// API Documentation: https://docs.birdeye.so
///
/// Endpoints implemented:
/// 1. /defi/v3/token/market-data - market cap, total and circulating supply
pub mod types;

pub use self::types::{BirdeyeMarketData, BirdeyeMarketResponse, TokenMarket};

use std::sync::Arc;
use std::time::Duration;

use crate::apis::client::HttpClient;
use crate::apis::error::ApiError;
use crate::apis::stats::{ApiStats, ApiStatsTracker};
use crate::config::BirdeyeConfig;
use crate::logger::{self, LogTag};

pub const PROVIDER_NAME: &str = "birdeye";

const MARKET_DATA_ENDPOINT: &str = "defi/v3/token/market-data";

pub struct BirdeyeClient {
    http: HttpClient,
    base_url: String,
    chain: String,
    api_key: String,
    enabled: bool,
}

impl BirdeyeClient {
    pub fn new(config: &BirdeyeConfig) -> Result<Self, String> {
        if config.enabled && config.api_key.is_empty() {
            logger::warning(
                LogTag::Api,
                "Birdeye API key is empty - requests will likely be rejected",
            );
        }

        Ok(Self {
            http: HttpClient::new(
                PROVIDER_NAME,
                config.timeout_seconds,
                config.rate_limit_per_minute,
            )?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            chain: config.chain.clone(),
            api_key: config.api_key.clone(),
            enabled: config.enabled,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn stats_tracker(&self) -> Arc<ApiStatsTracker> {
        self.http.stats()
    }

    pub async fn get_stats(&self) -> ApiStats {
        self.http.stats().get_stats().await
    }

    /// Fetch market cap and supply figures for `mint`
    ///
    /// A body without a `data` object is an invalid response and counts as a
    /// failed request.
    pub async fn fetch_token_market(&self, mint: &str) -> Result<TokenMarket, ApiError> {
        if !self.enabled {
            return Err(ApiError::Disabled);
        }

        let url = format!("{}/{}", self.base_url, MARKET_DATA_ENDPOINT);

        logger::debug(
            LogTag::Api,
            &format!("[BIRDEYE] Fetching market data: mint={}, chain={}", mint, self.chain),
        );

        let request = self
            .http
            .client()
            .get(&url)
            .query(&[("address", mint), ("ui_amount_mode", "scaled")])
            .header("accept", "application/json")
            .header("x-api-key", &self.api_key)
            .header("x-chain", &self.chain);

        let raw: BirdeyeMarketResponse = self.http.get_json(MARKET_DATA_ENDPOINT, request).await?;
        Ok(raw.data.to_market())
    }

    /// Record a market-data request that was abandoned after `waited`
    pub async fn record_timeout(&self, waited: Duration) {
        self.http
            .record_abandoned(MARKET_DATA_ENDPOINT, waited)
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn config_for(server: &mockito::ServerGuard) -> BirdeyeConfig {
        BirdeyeConfig {
            api_key: "birdeye-key".to_string(),
            base_url: server.url(),
            timeout_seconds: 5,
            rate_limit_per_minute: 0,
            ..BirdeyeConfig::default()
        }
    }

    #[tokio::test]
    async fn test_fetch_token_market() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/defi/v3/token/market-data")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("address".into(), "TOKEN123".into()),
                Matcher::UrlEncoded("ui_amount_mode".into(), "scaled".into()),
            ]))
            .match_header("x-api-key", "birdeye-key")
            .match_header("x-chain", "solana")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"success":true,"data":{"market_cap":1000000.0,"total_supply":5000000.0,"circulating_supply":4000000.0}}"#,
            )
            .create_async()
            .await;

        let client = BirdeyeClient::new(&config_for(&server)).unwrap();
        let market = client.fetch_token_market("TOKEN123").await.unwrap();

        mock.assert_async().await;
        assert_eq!(market.market_cap, Some(1_000_000.0));
        assert_eq!(market.circulating_supply, Some(4_000_000.0));
    }

    #[tokio::test]
    async fn test_missing_data_is_invalid() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/defi/v3/token/market-data")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"success":false,"message":"Unauthorized"}"#)
            .create_async()
            .await;

        let client = BirdeyeClient::new(&config_for(&server)).unwrap();
        assert!(matches!(
            client.fetch_token_market("TOKEN123").await,
            Err(ApiError::InvalidResponse(_))
        ));

        let stats = client.get_stats().await;
        assert_eq!(stats.total_requests, 1);
        assert_eq!(stats.successful_requests, 0);
        assert_eq!(stats.failed_requests, 1);
        assert!(stats.last_error.unwrap().contains("data"));
    }

    #[tokio::test]
    async fn test_abandoned_request_counts_as_failure() {
        let server = mockito::Server::new_async().await;
        let client = BirdeyeClient::new(&config_for(&server)).unwrap();

        client.record_timeout(Duration::from_secs(2)).await;

        let stats = client.get_stats().await;
        assert_eq!(stats.total_requests, 1);
        assert_eq!(stats.failed_requests, 1);
        assert_eq!(stats.average_response_time_ms, 2000.0);
        assert_eq!(stats.last_error.as_deref(), Some("Request timeout"));
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/defi/v3/token/market-data")
            .match_query(Matcher::Any)
            .with_status(429)
            .create_async()
            .await;

        let client = BirdeyeClient::new(&config_for(&server)).unwrap();
        assert_eq!(
            client.fetch_token_market("TOKEN123").await,
            Err(ApiError::RateLimitExceeded)
        );
    }
}
