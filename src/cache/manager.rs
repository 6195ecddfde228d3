/// Namespaced cache with per-identifier hit/miss statistics
use std::time::Instant;

use super::backend::AccessUpdate;
use super::keys;
use super::store::{KvStore, ServerInfo, StoreResponse};
use super::types::{CacheInfo, CacheStatsRecord, Cacheable, HitRate, HitRateReport, PerformanceReport};
use crate::logger::{self, LogTag};

/// `cache_info.source` stamped on records written after an upstream fetch
pub const SOURCE_API: &str = "api";

#[derive(Clone)]
pub struct CacheManager {
    store: KvStore,
    namespace: String,
    stats_ttl_seconds: u64,
}

impl CacheManager {
    pub fn new(store: KvStore, namespace: impl Into<String>, stats_ttl_seconds: u64) -> Self {
        Self {
            store,
            namespace: namespace.into(),
            stats_ttl_seconds,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn store(&self) -> &KvStore {
        &self.store
    }

    pub fn build_data_key(&self, identifier: &str) -> String {
        keys::data_key(&self.namespace, identifier)
    }

    pub fn build_stats_key(&self, identifier: &str) -> String {
        keys::stats_key(&self.namespace, identifier)
    }

    /// Count one lookup against the identifier's statistics
    pub async fn record_access(&self, identifier: &str, was_hit: bool, elapsed_seconds: f64) {
        let key = self.build_stats_key(identifier);
        let update = AccessUpdate {
            was_hit,
            elapsed_seconds,
        };
        if let StoreResponse::Error(e) = self
            .store
            .update_stats(&key, update, self.stats_ttl_seconds)
            .await
        {
            logger::warning(
                LogTag::Cache,
                &format!("Failed to record cache access for {}: {}", identifier, e),
            );
        }
    }

    /// Cached record for `identifier`, counting the lookup as a hit or miss
    ///
    /// An unavailable or failing backend reads as a miss.
    pub async fn read<T: Cacheable>(&self, identifier: &str) -> Option<T> {
        let started = Instant::now();
        let key = self.build_data_key(identifier);

        let value = self.store.get::<T>(&key).await.value().flatten();
        let elapsed = started.elapsed().as_secs_f64();

        self.record_access(identifier, value.is_some(), elapsed)
            .await;
        value
    }

    /// Stamp `cache_info` onto `record` and persist it under the data key
    ///
    /// Returns whether the backend accepted the write.
    pub async fn write<T: Cacheable>(
        &self,
        identifier: &str,
        record: &mut T,
        ttl_seconds: Option<u64>,
    ) -> bool {
        *record.cache_info_mut() = Some(CacheInfo {
            source: SOURCE_API.to_string(),
            cached_at: chrono::Utc::now().to_rfc3339(),
            namespace: self.namespace.clone(),
            response_time: None,
        });

        let key = self.build_data_key(identifier);
        let stored = self.store.set(&key, &*record, ttl_seconds).await.is_value();
        if stored {
            logger::debug(
                LogTag::Cache,
                &format!("Cached record for {} under {}", identifier, key),
            );
        }
        stored
    }

    pub async fn hit_rate(&self, identifier: &str) -> HitRateReport {
        let key = self.build_stats_key(identifier);
        match self.store.get::<CacheStatsRecord>(&key).await {
            StoreResponse::Value(stats) => {
                HitRateReport::Stats(HitRate::from_stats(&stats.unwrap_or_default()))
            }
            StoreResponse::Unavailable => HitRateReport::Stats(HitRate::default()),
            StoreResponse::Error(error) => HitRateReport::Error { error },
        }
    }

    pub async fn performance_report(&self, identifier: &str) -> PerformanceReport {
        let server_info: ServerInfo = self.store.server_info().await;
        let hit_rate = self.hit_rate(identifier).await;

        PerformanceReport {
            server_info,
            hit_rate,
            identifier: identifier.to_string(),
            data_key: self.build_data_key(identifier),
            stats_key: self.build_stats_key(identifier),
            namespace: self.namespace.clone(),
        }
    }

    /// Drop the cached record for `identifier`, keeping its statistics
    ///
    /// Returns whether a record was removed.
    pub async fn invalidate(&self, identifier: &str) -> bool {
        let key = self.build_data_key(identifier);
        matches!(self.store.delete(&key).await, StoreResponse::Value(true))
    }

    /// Remove every record and every statistics entry
    pub async fn clear_all(&self) -> bool {
        self.store.clear_all().await.is_value()
    }
}
