/// Cache-first tokenomics aggregation
///
/// Flow: cache read -> (hit) return with `cache_info.response_time`
///                   -> (miss) fetch both providers concurrently -> merge
///                      -> store when at least one provider answered.
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::error::TokenomicsError;
use super::sources::{TokenDetailsSource, TokenMarketSource};
use super::types::{DataSources, ProviderStatus, TokenomicsData};
use crate::apis::{ApiError, TokenDetails, TokenMarket};
use crate::cache::{CacheManager, PerformanceReport};
use crate::config::TokenomicsConfig;
use crate::logger::{self, LogTag};

/// Placeholder name used when the details provider failed
pub const FALLBACK_TOKEN_NAME: &str = "Unknown Token";
/// Placeholder symbol used when the details provider failed
pub const FALLBACK_TOKEN_SYMBOL: &str = "UNKNOWN";

pub struct TokenomicsAggregator {
    cache: CacheManager,
    details_source: Arc<dyn TokenDetailsSource>,
    market_source: Arc<dyn TokenMarketSource>,
    token_address: String,
    data_ttl_seconds: u64,
    provider_timeout: Duration,
}

impl TokenomicsAggregator {
    pub fn new(
        cache: CacheManager,
        details_source: Arc<dyn TokenDetailsSource>,
        market_source: Arc<dyn TokenMarketSource>,
        config: &TokenomicsConfig,
    ) -> Self {
        Self {
            cache,
            details_source,
            market_source,
            token_address: config.token_address.clone(),
            data_ttl_seconds: config.data_ttl_seconds,
            provider_timeout: Duration::from_secs(config.provider_timeout_seconds.max(1)),
        }
    }

    pub fn token_address(&self) -> &str {
        &self.token_address
    }

    pub fn cache(&self) -> &CacheManager {
        &self.cache
    }

    /// Aggregate data for the configured token
    pub async fn aggregate(&self) -> Result<TokenomicsData, TokenomicsError> {
        self.aggregate_for(&self.token_address).await
    }

    /// Aggregate data for `identifier`, serving from cache when possible
    pub async fn aggregate_for(&self, identifier: &str) -> Result<TokenomicsData, TokenomicsError> {
        if identifier.trim().is_empty() {
            return Err(TokenomicsError::MissingTokenAddress);
        }

        let started = Instant::now();
        logger::debug(
            LogTag::Aggregator,
            &format!("Checking cache for token: {}", identifier),
        );

        if let Some(mut cached) = self.cache.read::<TokenomicsData>(identifier).await {
            let response_time = started.elapsed().as_secs_f64();
            if let Some(info) = cached.cache_info.as_mut() {
                info.response_time = Some(response_time);
            }
            logger::info(
                LogTag::Aggregator,
                &format!("Returning cached data in {:.3}s", response_time),
            );
            return Ok(cached);
        }

        logger::info(LogTag::Aggregator, "Fetching fresh data from providers");

        let details_task = {
            let source = Arc::clone(&self.details_source);
            let mint = identifier.to_string();
            let timeout = self.provider_timeout;
            tokio::spawn(async move {
                let fetch = source.fetch_details(&mint);
                match fetch_with_fallback(source.name(), timeout, fetch).await {
                    Ok(value) => Some(value),
                    Err(FetchFailure::TimedOut) => {
                        source.record_timeout(&mint, timeout).await;
                        None
                    }
                    Err(FetchFailure::Provider) => None,
                }
            })
        };
        let market_task = {
            let source = Arc::clone(&self.market_source);
            let mint = identifier.to_string();
            let timeout = self.provider_timeout;
            tokio::spawn(async move {
                let fetch = source.fetch_market(&mint);
                match fetch_with_fallback(source.name(), timeout, fetch).await {
                    Ok(value) => Some(value),
                    Err(FetchFailure::TimedOut) => {
                        source.record_timeout(&mint, timeout).await;
                        None
                    }
                    Err(FetchFailure::Provider) => None,
                }
            })
        };

        let (details, market) = tokio::join!(details_task, market_task);
        let details = details.unwrap_or_else(|e| {
            logger::error(
                LogTag::Aggregator,
                &format!("{} fetch task aborted: {}", self.details_source.name(), e),
            );
            None
        });
        let market = market.unwrap_or_else(|e| {
            logger::error(
                LogTag::Aggregator,
                &format!("{} fetch task aborted: {}", self.market_source.name(), e),
            );
            None
        });

        let mut data = merge(details, market, started.elapsed().as_secs_f64());

        if data.has_provider_data() {
            logger::debug(LogTag::Aggregator, "Caching aggregated data");
            if !self
                .cache
                .write(identifier, &mut data, Some(self.data_ttl_seconds))
                .await
            {
                logger::warning(LogTag::Aggregator, "Failed to cache aggregated data");
            }
        } else {
            logger::warning(
                LogTag::Aggregator,
                "No data available from any provider, not caching",
            );
        }

        Ok(data)
    }

    /// Cache diagnostics for the configured token
    pub async fn cache_performance(&self) -> PerformanceReport {
        self.cache.performance_report(&self.token_address).await
    }
}

/// Why a provider contributed nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailure {
    /// The provider answered with an error
    Provider,
    /// The aggregator stopped waiting; the request was dropped in flight
    TimedOut,
}

/// Await one provider fetch under `timeout`, logging the outcome
pub async fn fetch_with_fallback<T, F>(
    provider: &str,
    timeout: Duration,
    fetch: F,
) -> Result<T, FetchFailure>
where
    F: Future<Output = Result<T, ApiError>>,
{
    let started = Instant::now();
    logger::debug(LogTag::Aggregator, &format!("Fetching data from {}", provider));

    match tokio::time::timeout(timeout, fetch).await {
        Ok(Ok(value)) => {
            logger::info(
                LogTag::Aggregator,
                &format!(
                    "Successfully fetched data from {} in {:.3}s",
                    provider,
                    started.elapsed().as_secs_f64()
                ),
            );
            Ok(value)
        }
        Ok(Err(e)) => {
            logger::error(
                LogTag::Aggregator,
                &format!(
                    "Failed to fetch data from {} after {:.3}s: {}",
                    provider,
                    started.elapsed().as_secs_f64(),
                    e
                ),
            );
            Err(FetchFailure::Provider)
        }
        Err(_) => {
            logger::error(
                LogTag::Aggregator,
                &format!(
                    "{} did not answer within {}s",
                    provider,
                    timeout.as_secs()
                ),
            );
            Err(FetchFailure::TimedOut)
        }
    }
}

/// Combine provider outcomes into one record
///
/// A failed provider contributes fallback placeholders; a successful one
/// contributes exactly what it returned.
pub fn merge(
    details: Option<TokenDetails>,
    market: Option<TokenMarket>,
    response_time: f64,
) -> TokenomicsData {
    let data_sources = DataSources {
        moralis: ProviderStatus::from_outcome(&details),
        birdeye: ProviderStatus::from_outcome(&market),
    };

    let details = details.unwrap_or_else(|| TokenDetails {
        token_name: Some(FALLBACK_TOKEN_NAME.to_string()),
        token_symbol: Some(FALLBACK_TOKEN_SYMBOL.to_string()),
        price_usd: Some(0.0),
        price_change_percentage_24h: Some(0.0),
        volume_24h: Some(0.0),
    });
    let market = market.unwrap_or(TokenMarket {
        market_cap: Some(0.0),
        total_supply: Some(0.0),
        circulating_supply: Some(0.0),
    });

    TokenomicsData {
        token_name: details.token_name,
        token_symbol: details.token_symbol,
        price_usd: details.price_usd,
        price_change_percentage_24h: details.price_change_percentage_24h,
        volume_24h: details.volume_24h,
        market_cap: market.market_cap,
        total_supply: market.total_supply,
        circulating_supply: market.circulating_supply,
        data_sources,
        response_time,
        cache_info: None,
    }
}
