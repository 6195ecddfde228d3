use axum::Router;
use std::sync::Arc;

use crate::webserver::state::AppState;

pub mod cache;
pub mod providers;
pub mod status;
pub mod tokenomics;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(status::routes())
        .nest("/api/v1", api_routes())
        .nest("/cache", cache::routes())
        .with_state(state)
}

/// Versioned JSON API
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(tokenomics::routes())
        .merge(providers::routes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apis::ApiManager;
    use crate::cache::{CacheManager, KvStore, MemoryBackend};
    use crate::config::{ProvidersConfig, TokenomicsConfig};
    use crate::tokenomics::TokenomicsAggregator;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    /// State whose providers are disabled, so no request leaves the process
    fn offline_state(token_address: &str) -> Arc<AppState> {
        let mut providers = ProvidersConfig::default();
        providers.moralis.enabled = false;
        providers.birdeye.enabled = false;
        let api_manager = Arc::new(ApiManager::from_config(&providers).unwrap());

        let store = KvStore::new(Arc::new(MemoryBackend::new()), 300);
        let cache = CacheManager::new(store, "tokenomics", 3600);
        let config = TokenomicsConfig {
            token_address: token_address.to_string(),
            ..TokenomicsConfig::default()
        };
        let aggregator = TokenomicsAggregator::new(
            cache,
            api_manager.moralis.clone(),
            api_manager.birdeye.clone(),
            &config,
        );

        Arc::new(AppState::new(Arc::new(aggregator), api_manager))
    }

    async fn get_json(state: Arc<AppState>, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = create_router(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json(offline_state("TOKEN123"), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_tokenomics_with_failed_providers() {
        let (status, body) = get_json(offline_state("TOKEN123"), "/api/v1/tokenomics").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Market data retrieved successfully");
        assert_eq!(body["data"]["token_symbol"], "UNKNOWN");
        assert_eq!(body["data"]["data_sources"]["moralis"], "failed");
        assert_eq!(body["data"]["data_sources"]["birdeye"], "failed");
    }

    #[tokio::test]
    async fn test_tokenomics_without_token_address() {
        let (status, body) = get_json(offline_state(""), "/api/v1/tokenomics").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], "token address is not configured");
    }

    #[tokio::test]
    async fn test_cache_endpoints() {
        let state = offline_state("TOKEN123");
        for uri in ["/cache/status", "/cache/performance"] {
            let (status, body) = get_json(state.clone(), uri).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["namespace"], "tokenomics");
            assert_eq!(body["identifier"], "TOKEN123");
            assert_eq!(body["server_info"]["status"], "available");
            assert_eq!(body["hit_rate"]["total_requests"], 0);
        }
    }

    #[tokio::test]
    async fn test_provider_stats() {
        let (status, body) = get_json(offline_state("TOKEN123"), "/api/v1/providers/stats").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["moralis"]["total_requests"], 0);
        assert_eq!(body["birdeye"]["failed_requests"], 0);
    }
}
