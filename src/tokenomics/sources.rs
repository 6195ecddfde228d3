/// Provider seams used by the aggregator
///
/// The aggregator only sees these traits, so tests can substitute counting
/// or failing fakes for the HTTP clients.
use async_trait::async_trait;
use std::time::Duration;

use crate::apis::birdeye::{self, BirdeyeClient, TokenMarket};
use crate::apis::moralis::{self, MoralisClient, TokenDetails};
use crate::apis::ApiError;

/// Source of token identity and price fields
#[async_trait]
pub trait TokenDetailsSource: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    async fn fetch_details(&self, mint: &str) -> Result<TokenDetails, ApiError>;

    /// Called when the aggregator stopped waiting for `fetch_details`
    async fn record_timeout(&self, _mint: &str, _waited: Duration) {}
}

/// Source of market cap and supply fields
#[async_trait]
pub trait TokenMarketSource: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    async fn fetch_market(&self, mint: &str) -> Result<TokenMarket, ApiError>;

    /// Called when the aggregator stopped waiting for `fetch_market`
    async fn record_timeout(&self, _mint: &str, _waited: Duration) {}
}

#[async_trait]
impl TokenDetailsSource for MoralisClient {
    fn name(&self) -> &'static str {
        moralis::PROVIDER_NAME
    }

    async fn fetch_details(&self, mint: &str) -> Result<TokenDetails, ApiError> {
        self.fetch_token_details(mint).await
    }

    async fn record_timeout(&self, mint: &str, waited: Duration) {
        MoralisClient::record_timeout(self, mint, waited).await
    }
}

#[async_trait]
impl TokenMarketSource for BirdeyeClient {
    fn name(&self) -> &'static str {
        birdeye::PROVIDER_NAME
    }

    async fn fetch_market(&self, mint: &str) -> Result<TokenMarket, ApiError> {
        self.fetch_token_market(mint).await
    }

    async fn record_timeout(&self, _mint: &str, waited: Duration) {
        BirdeyeClient::record_timeout(self, waited).await
    }
}
