//! Tokenomics aggregation: cache-first fan-out to both providers

pub mod aggregator;
pub mod error;
pub mod sources;
pub mod types;

pub use aggregator::{merge, TokenomicsAggregator, FALLBACK_TOKEN_NAME, FALLBACK_TOKEN_SYMBOL};
pub use error::TokenomicsError;
pub use sources::{TokenDetailsSource, TokenMarketSource};
pub use types::{DataSources, ProviderStatus, TokenomicsData};
