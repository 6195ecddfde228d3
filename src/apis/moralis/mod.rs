/// Moralis Solana gateway client
///
/// API Documentation: https://docs.moralis.com/web3-data-api/solana
///
/// Endpoints implemented:
/// 1. /token/{network}/{address}/price - token name, symbol, USD price and 24h change
pub mod types;

pub use self::types::{MoralisPriceResponse, TokenDetails};

use std::sync::Arc;
use std::time::Duration;

use crate::apis::client::HttpClient;
use crate::apis::error::ApiError;
use crate::apis::stats::{ApiStats, ApiStatsTracker};
use crate::config::MoralisConfig;
use crate::logger::{self, LogTag};

pub const PROVIDER_NAME: &str = "moralis";

pub struct MoralisClient {
    http: HttpClient,
    base_url: String,
    network: String,
    api_key: String,
    enabled: bool,
}

impl MoralisClient {
    pub fn new(config: &MoralisConfig) -> Result<Self, String> {
        if config.enabled && config.api_key.is_empty() {
            logger::warning(
                LogTag::Api,
                "Moralis API key is empty - requests will likely be rejected",
            );
        }

        Ok(Self {
            http: HttpClient::new(
                PROVIDER_NAME,
                config.timeout_seconds,
                config.rate_limit_per_minute,
            )?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            network: config.network.clone(),
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

    /// Fetch name, symbol, price and 24h change for `mint`
    pub async fn fetch_token_details(&self, mint: &str) -> Result<TokenDetails, ApiError> {
        if !self.enabled {
            return Err(ApiError::Disabled);
        }

        let endpoint = self.price_endpoint(mint);
        let url = format!("{}/{}", self.base_url, endpoint);

        logger::debug(
            LogTag::Api,
            &format!("[MORALIS] Fetching token price: mint={}, network={}", mint, self.network),
        );

        let request = self
            .http
            .client()
            .get(&url)
            .header("accept", "application/json")
            .header("X-API-Key", &self.api_key);

        let raw: MoralisPriceResponse = self.http.get_json(&endpoint, request).await?;
        Ok(raw.to_details())
    }

    /// Record a price request that was abandoned after `waited`
    pub async fn record_timeout(&self, mint: &str, waited: Duration) {
        self.http
            .record_abandoned(&self.price_endpoint(mint), waited)
            .await;
    }

    fn price_endpoint(&self, mint: &str) -> String {
        format!("token/{}/{}/price", self.network, mint)
    }
}
