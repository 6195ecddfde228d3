//! Cache layer
//!
//! - [`backend`]: the `CacheBackend` trait implemented by [`redis`] and [`memory`]
//! - [`store`]: typed JSON adapter reporting `StoreResponse` outcomes
//! - [`manager`]: namespaced keys, hit/miss statistics and diagnostics

pub mod backend;
pub mod keys;
pub mod manager;
pub mod memory;
pub mod redis;
pub mod store;
pub mod types;

pub use backend::{AccessUpdate, BackendError, BackendInfo, CacheBackend};
pub use manager::CacheManager;
pub use memory::MemoryBackend;
pub use self::redis::RedisBackend;
pub use store::{KvStore, ServerInfo, StoreResponse};
pub use types::{CacheInfo, CacheStatsRecord, Cacheable, HitRate, HitRateReport, PerformanceReport};

use std::sync::Arc;

use crate::config::CacheConfig;
use crate::logger::{self, LogTag};

/// Build the backend selected by `cache.backend`
///
/// Unknown backend names fall back to Redis with a warning.
pub async fn connect_backend(config: &CacheConfig) -> Arc<dyn CacheBackend> {
    match config.backend.to_lowercase().as_str() {
        "memory" => {
            logger::info(LogTag::Cache, "Using in-process cache backend");
            Arc::new(MemoryBackend::new())
        }
        "redis" => Arc::new(RedisBackend::connect(config).await),
        other => {
            logger::warning(
                LogTag::Cache,
                &format!("Unknown cache backend '{}', using redis", other),
            );
            Arc::new(RedisBackend::connect(config).await)
        }
    }
}

/// Wire backend, store adapter and manager from the cache settings
pub async fn build_cache_manager(config: &CacheConfig) -> CacheManager {
    let backend = connect_backend(config).await;
    let store = KvStore::new(backend, config.default_ttl_seconds);
    CacheManager::new(store, config.namespace.clone(), config.stats_ttl_seconds)
}
