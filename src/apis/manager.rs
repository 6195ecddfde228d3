/// Provider client registry
///
/// Owns one client per upstream provider, each with its own rate limiter and
/// request statistics.
use serde::Serialize;
use std::sync::Arc;

use super::birdeye::BirdeyeClient;
use super::moralis::MoralisClient;
use super::stats::ApiStats;
use crate::config::ProvidersConfig;
use crate::logger::{self, LogTag};

pub struct ApiManager {
    pub moralis: Arc<MoralisClient>,
    pub birdeye: Arc<BirdeyeClient>,
}

impl ApiManager {
    pub fn from_config(config: &ProvidersConfig) -> Result<Self, String> {
        logger::info(
            LogTag::Api,
            &format!(
                "Initializing API clients (moralis={}, birdeye={})",
                if config.moralis.enabled { "enabled" } else { "disabled" },
                if config.birdeye.enabled { "enabled" } else { "disabled" },
            ),
        );

        let moralis = MoralisClient::new(&config.moralis)
            .map_err(|e| format!("Failed to initialize Moralis client: {}", e))?;
        let birdeye = BirdeyeClient::new(&config.birdeye)
            .map_err(|e| format!("Failed to initialize Birdeye client: {}", e))?;

        Ok(Self {
            moralis: Arc::new(moralis),
            birdeye: Arc::new(birdeye),
        })
    }

    /// Request statistics for every provider
    pub async fn get_all_stats(&self) -> ApiManagerStats {
        ApiManagerStats {
            moralis: self.moralis.get_stats().await,
            birdeye: self.birdeye.get_stats().await,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiManagerStats {
    pub moralis: ApiStats,
    pub birdeye: ApiStats,
}
