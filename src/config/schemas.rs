// Configuration schema for the tokenomics service

use crate::config_struct;

// ============================================================================
// TOKENOMICS
// ============================================================================

config_struct! {
    /// Aggregation settings
    pub struct TokenomicsConfig {
        /// Token mint address queried by the public endpoint
        token_address: String = String::new(),

        /// TTL applied to merged records written after a cache miss
        data_ttl_seconds: u64 = 300,

        /// Upper bound for each provider fetch, enforced by the aggregator
        provider_timeout_seconds: u64 = 10,
    }
}

// ============================================================================
// CACHE
// ============================================================================

config_struct! {
    /// Cache backend and key settings
    pub struct CacheConfig {
        /// "redis" or "memory"
        backend: String = "redis".to_string(),

        /// Key prefix shared by every key this service writes
        namespace: String = "tokenomics".to_string(),

        redis_host: String = "127.0.0.1".to_string(),
        redis_port: u16 = 6379,
        redis_password: String = String::new(),
        redis_db: i64 = 0,

        /// TTL used by writes that do not pass one explicitly
        default_ttl_seconds: u64 = 300,

        /// TTL of per-identifier hit/miss statistics
        stats_ttl_seconds: u64 = 3600,

        connect_timeout_seconds: u64 = 5,
        operation_timeout_seconds: u64 = 5,
    }
}

// ============================================================================
// PROVIDERS
// ============================================================================

config_struct! {
    /// Moralis (token name, symbol, price) client settings
    pub struct MoralisConfig {
        enabled: bool = true,
        api_key: String = String::new(),
        base_url: String = "https://solana-gateway.moralis.io".to_string(),
        network: String = "mainnet".to_string(),
        timeout_seconds: u64 = 10,
        rate_limit_per_minute: usize = 60,
    }
}

config_struct! {
    /// Birdeye (market cap, supply) client settings
    pub struct BirdeyeConfig {
        enabled: bool = true,
        api_key: String = String::new(),
        base_url: String = "https://public-api.birdeye.so".to_string(),
        chain: String = "solana".to_string(),
        timeout_seconds: u64 = 10,
        rate_limit_per_minute: usize = 60,
    }
}

config_struct! {
    pub struct ProvidersConfig {
        moralis: MoralisConfig = MoralisConfig::default(),
        birdeye: BirdeyeConfig = BirdeyeConfig::default(),
    }
}

// ============================================================================
// WEBSERVER
// ============================================================================

config_struct! {
    pub struct WebserverConfig {
        host: String = "0.0.0.0".to_string(),
        port: u16 = 8000,

        /// Origins allowed by the CORS layer
        cors_origins: Vec<String> = vec![
            "http://localhost:3000".to_string(),
            "http://127.0.0.1:3000".to_string(),
            "http://localhost:5173".to_string(),
            "http://127.0.0.1:5173".to_string(),
        ],
    }
}

// ============================================================================
// ROOT CONFIGURATION
// ============================================================================

config_struct! {
    /// Root configuration structure containing all sub-configurations
    pub struct Config {
        tokenomics: TokenomicsConfig = TokenomicsConfig::default(),
        cache: CacheConfig = CacheConfig::default(),
        providers: ProvidersConfig = ProvidersConfig::default(),
        webserver: WebserverConfig = WebserverConfig::default(),
    }
}
