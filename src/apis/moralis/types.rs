/// Moralis Solana gateway payloads
use serde::{Deserialize, Serialize};

use crate::apis::types::deserialize_optional_f64;

/// Raw body of `GET /token/{network}/{mint}/price`
///
/// Only the fields the service consumes are declared.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoralisPriceResponse {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub usd_price: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub usd_price24hr_percent_change: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub usd_price24h: Option<f64>,
}

/// Token identity and price fields supplied by Moralis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenDetails {
    pub token_name: Option<String>,
    pub token_symbol: Option<String>,
    pub price_usd: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
    pub volume_24h: Option<f64>,
}

impl MoralisPriceResponse {
    pub fn to_details(self) -> TokenDetails {
        TokenDetails {
            token_name: self.name,
            token_symbol: self.symbol,
            price_usd: self.usd_price,
            price_change_percentage_24h: self.usd_price24hr_percent_change,
            volume_24h: self.usd_price24h,
        }
    }
}
