/// Merged tokenomics record served by the API and stored in the cache
use serde::{Deserialize, Serialize};

use crate::cache::{CacheInfo, Cacheable};

/// Whether a provider contributed to a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderStatus {
    Available,
    Failed,
}

impl ProviderStatus {
    pub fn from_outcome<T>(outcome: &Option<T>) -> Self {
        if outcome.is_some() {
            ProviderStatus::Available
        } else {
            ProviderStatus::Failed
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSources {
    pub moralis: ProviderStatus,
    pub birdeye: ProviderStatus,
}

/// Aggregated market data for one token
///
/// Fields a provider did not supply are `None` (JSON `null`). When a whole
/// provider failed its fields carry fallback placeholders instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenomicsData {
    pub token_name: Option<String>,
    pub token_symbol: Option<String>,
    pub price_usd: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
    pub volume_24h: Option<f64>,
    pub market_cap: Option<f64>,
    pub total_supply: Option<f64>,
    pub circulating_supply: Option<f64>,
    pub data_sources: DataSources,
    /// Seconds spent aggregating this record on the miss path
    pub response_time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_info: Option<CacheInfo>,
}

impl TokenomicsData {
    /// True when at least one provider contributed
    pub fn has_provider_data(&self) -> bool {
        self.data_sources.moralis == ProviderStatus::Available
            || self.data_sources.birdeye == ProviderStatus::Available
    }
}

impl Cacheable for TokenomicsData {
    fn cache_info_mut(&mut self) -> &mut Option<CacheInfo> {
        &mut self.cache_info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_status_serialization() {
        let sources = DataSources {
            moralis: ProviderStatus::Failed,
            birdeye: ProviderStatus::Available,
        };
        assert_eq!(
            serde_json::to_value(&sources).unwrap(),
            serde_json::json!({"moralis": "failed", "birdeye": "available"})
        );
    }
}
