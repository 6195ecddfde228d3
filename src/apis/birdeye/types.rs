/// Birdeye public API payloads
use serde::{Deserialize, Serialize};

use crate::apis::types::deserialize_optional_f64;

/// Envelope of `GET /defi/v3/token/market-data`
///
/// `data` is required: a body without it fails to decode.
#[derive(Debug, Clone, Deserialize)]
pub struct BirdeyeMarketResponse {
    pub data: BirdeyeMarketData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BirdeyeMarketData {
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub market_cap: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub total_supply: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub circulating_supply: Option<f64>,
}

/// Market cap and supply fields supplied by Birdeye
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenMarket {
    pub market_cap: Option<f64>,
    pub total_supply: Option<f64>,
    pub circulating_supply: Option<f64>,
}

impl BirdeyeMarketData {
    pub fn to_market(self) -> TokenMarket {
        TokenMarket {
            market_cap: self.market_cap,
            total_supply: self.total_supply,
            circulating_supply: self.circulating_supply,
        }
    }
}
