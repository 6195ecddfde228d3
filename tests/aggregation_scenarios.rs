//! End-to-end aggregation through the real provider clients, against mocked
//! upstreams and an in-process cache backend.

use async_trait::async_trait;
use mockito::{Matcher, Mock, ServerGuard};
use parking_lot::Mutex;
use std::sync::Arc;

use tokenomics::apis::ApiManager;
use tokenomics::cache::{
    AccessUpdate, BackendError, BackendInfo, CacheBackend, CacheManager, HitRateReport, KvStore,
    MemoryBackend,
};
use tokenomics::config::{ProvidersConfig, TokenomicsConfig};
use tokenomics::tokenomics::{ProviderStatus, TokenomicsAggregator};

/// Memory backend that remembers every data write
struct RecordingBackend {
    inner: MemoryBackend,
    writes: Mutex<Vec<(String, u64)>>,
}

impl RecordingBackend {
    fn new() -> Self {
        Self {
            inner: MemoryBackend::new(),
            writes: Mutex::new(Vec::new()),
        }
    }

    fn writes(&self) -> Vec<(String, u64)> {
        self.writes.lock().clone()
    }
}

#[async_trait]
impl CacheBackend for RecordingBackend {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        self.inner.get(key).await
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), BackendError> {
        self.writes.lock().push((key.to_string(), ttl_seconds));
        self.inner.set_ex(key, value, ttl_seconds).await
    }

    async fn delete(&self, key: &str) -> Result<bool, BackendError> {
        self.inner.delete(key).await
    }

    async fn flush(&self) -> Result<(), BackendError> {
        self.inner.flush().await
    }

    async fn info(&self) -> Result<BackendInfo, BackendError> {
        self.inner.info().await
    }

    async fn record_access(
        &self,
        key: &str,
        update: AccessUpdate,
        stamped_at: &str,
        ttl_seconds: u64,
    ) -> Result<(), BackendError> {
        self.inner
            .record_access(key, update, stamped_at, ttl_seconds)
            .await
    }
}

struct Scenario {
    aggregator: TokenomicsAggregator,
    backend: Arc<RecordingBackend>,
}

fn scenario(server: &ServerGuard) -> Scenario {
    let mut providers = ProvidersConfig::default();
    providers.moralis.base_url = server.url();
    providers.moralis.api_key = "moralis-key".to_string();
    providers.moralis.rate_limit_per_minute = 0;
    providers.birdeye.base_url = server.url();
    providers.birdeye.api_key = "birdeye-key".to_string();
    providers.birdeye.rate_limit_per_minute = 0;
    let api_manager = ApiManager::from_config(&providers).unwrap();

    let backend = Arc::new(RecordingBackend::new());
    let store = KvStore::new(backend.clone(), 300);
    let cache = CacheManager::new(store, "tokenomics", 3600);

    let config = TokenomicsConfig {
        token_address: "TOKEN123".to_string(),
        data_ttl_seconds: 300,
        provider_timeout_seconds: 5,
    };

    Scenario {
        aggregator: TokenomicsAggregator::new(
            cache,
            api_manager.moralis.clone(),
            api_manager.birdeye.clone(),
            &config,
        ),
        backend,
    }
}

async fn mock_moralis(server: &mut ServerGuard, status: usize) -> Mock {
    server
        .mock("GET", "/token/mainnet/TOKEN123/price")
        .match_header("x-api-key", "moralis-key")
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"name":"Token 123","symbol":"T123","usdPrice":0.42,"usdPrice24hrPercentChange":-1.5,"usdPrice24h":0.43}"#,
        )
        .expect(1)
        .create_async()
        .await
}

async fn mock_birdeye(server: &mut ServerGuard, status: usize) -> Mock {
    server
        .mock("GET", "/defi/v3/token/market-data")
        .match_query(Matcher::UrlEncoded("address".into(), "TOKEN123".into()))
        .match_header("x-api-key", "birdeye-key")
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"success":true,"data":{"market_cap":42000000.0,"total_supply":100000000.0,"circulating_supply":90000000.0}}"#,
        )
        .expect(1)
        .create_async()
        .await
}

#[tokio::test]
async fn token123_first_call_fetches_second_call_hits_cache() {
    let mut server = mockito::Server::new_async().await;
    let moralis = mock_moralis(&mut server, 200).await;
    let birdeye = mock_birdeye(&mut server, 200).await;
    let s = scenario(&server);

    let first = s.aggregator.aggregate().await.unwrap();
    assert_eq!(first.token_symbol.as_deref(), Some("T123"));
    assert_eq!(first.market_cap, Some(42_000_000.0));
    assert_eq!(first.data_sources.moralis, ProviderStatus::Available);
    assert_eq!(first.data_sources.birdeye, ProviderStatus::Available);

    let data_key = s.aggregator.cache().build_data_key("TOKEN123");
    assert!(data_key.starts_with("tokenomics:data:"));
    assert_eq!(s.backend.writes(), vec![(data_key, 300)]);

    let second = s.aggregator.aggregate().await.unwrap();
    let info = second.cache_info.clone().unwrap();
    assert_eq!(info.source, "api");
    assert!(info.response_time.is_some());
    assert_eq!(second.token_name, first.token_name);
    assert_eq!(second.circulating_supply, first.circulating_supply);

    // each upstream was contacted exactly once across both calls
    moralis.assert_async().await;
    birdeye.assert_async().await;

    match s.aggregator.cache().hit_rate("TOKEN123").await {
        HitRateReport::Stats(rate) => {
            assert_eq!(rate.hits, 1);
            assert_eq!(rate.misses, 1);
            assert_eq!(rate.hit_rate_percent, 50.0);
        }
        other => panic!("unexpected report: {:?}", other),
    }
}

#[tokio::test]
async fn moralis_failure_keeps_birdeye_data_and_caches() {
    let mut server = mockito::Server::new_async().await;
    mock_moralis(&mut server, 500).await;
    mock_birdeye(&mut server, 200).await;
    let s = scenario(&server);

    let data = s.aggregator.aggregate().await.unwrap();
    assert_eq!(data.token_name.as_deref(), Some("Unknown Token"));
    assert_eq!(data.token_symbol.as_deref(), Some("UNKNOWN"));
    assert_eq!(data.price_usd, Some(0.0));
    assert_eq!(data.total_supply, Some(100_000_000.0));
    assert_eq!(data.data_sources.moralis, ProviderStatus::Failed);
    assert_eq!(data.data_sources.birdeye, ProviderStatus::Available);
    assert_eq!(s.backend.writes().len(), 1);
}

#[tokio::test]
async fn both_providers_failing_writes_nothing() {
    let mut server = mockito::Server::new_async().await;
    mock_moralis(&mut server, 404).await;
    mock_birdeye(&mut server, 429).await;
    let s = scenario(&server);

    let data = s.aggregator.aggregate().await.unwrap();
    assert_eq!(data.market_cap, Some(0.0));
    assert_eq!(data.data_sources.moralis, ProviderStatus::Failed);
    assert_eq!(data.data_sources.birdeye, ProviderStatus::Failed);
    assert!(data.cache_info.is_none());
    assert!(s.backend.writes().is_empty());
}
