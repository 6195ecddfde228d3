//! Upstream data provider clients
//!
//! - [`moralis`]: token name, symbol and price
//! - [`birdeye`]: market cap and supply
//!
//! Both clients share [`client::HttpClient`] for rate limiting, status
//! mapping and [`stats::ApiStatsTracker`] bookkeeping.

pub mod birdeye;
pub mod client;
pub mod error;
pub mod manager;
pub mod moralis;
pub mod stats;
pub mod types;

pub use birdeye::{BirdeyeClient, TokenMarket};
pub use error::ApiError;
pub use manager::{ApiManager, ApiManagerStats};
pub use moralis::{MoralisClient, TokenDetails};
pub use stats::{ApiStats, ApiStatsTracker};
