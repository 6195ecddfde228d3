/// Key-value store adapter
///
/// Typed JSON layer over a [`CacheBackend`]. Every operation reports its
/// outcome as a [`StoreResponse`] and logs it; nothing here returns an error
/// that the caller has to propagate.
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use super::backend::{AccessUpdate, BackendError, BackendInfo, CacheBackend};
use crate::logger::{self, LogTag};

/// Outcome of one store operation
#[derive(Debug, Clone, PartialEq)]
pub enum StoreResponse<T> {
    Value(T),
    /// Backend not connected; nothing was attempted
    Unavailable,
    Error(String),
}

impl<T> StoreResponse<T> {
    pub fn is_value(&self) -> bool {
        matches!(self, StoreResponse::Value(_))
    }

    pub fn value(self) -> Option<T> {
        match self {
            StoreResponse::Value(value) => Some(value),
            _ => None,
        }
    }

    fn from_backend_error(err: BackendError) -> Self {
        match err {
            BackendError::Unavailable(_) => StoreResponse::Unavailable,
            other => StoreResponse::Error(other.to_string()),
        }
    }
}

/// Backend status as reported by the diagnostic endpoints
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ServerInfo {
    Available {
        backend: String,
        host: String,
        port: u16,
        connected_clients: u64,
        used_memory: String,
        keyspace_hits: u64,
        keyspace_misses: u64,
    },
    Unavailable {
        message: String,
    },
    Error {
        message: String,
    },
}

impl ServerInfo {
    fn available(backend: &str, info: BackendInfo) -> Self {
        ServerInfo::Available {
            backend: backend.to_string(),
            host: info.host,
            port: info.port,
            connected_clients: info.connected_clients,
            used_memory: info.used_memory_human,
            keyspace_hits: info.keyspace_hits,
            keyspace_misses: info.keyspace_misses,
        }
    }
}

#[derive(Clone)]
pub struct KvStore {
    backend: Arc<dyn CacheBackend>,
    default_ttl_seconds: u64,
}

impl KvStore {
    pub fn new(backend: Arc<dyn CacheBackend>, default_ttl_seconds: u64) -> Self {
        Self {
            backend,
            default_ttl_seconds,
        }
    }

    pub fn default_ttl_seconds(&self) -> u64 {
        self.default_ttl_seconds
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Fetch and decode the value under `key`
    ///
    /// `Value(None)` is a miss. A stored value that no longer decodes as `T`
    /// is reported as a miss too.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> StoreResponse<Option<T>> {
        match self.backend.get(key).await {
            Ok(Some(raw)) => match serde_json::from_str::<T>(&raw) {
                Ok(value) => {
                    logger::debug(LogTag::Cache, &format!("Cache HIT for key: {}", key));
                    StoreResponse::Value(Some(value))
                }
                Err(e) => {
                    logger::warning(
                        LogTag::Cache,
                        &format!("Cache value for key {} failed to decode ({}), treating as miss", key, e),
                    );
                    StoreResponse::Value(None)
                }
            },
            Ok(None) => {
                logger::debug(LogTag::Cache, &format!("Cache MISS for key: {}", key));
                StoreResponse::Value(None)
            }
            Err(e) => self.report_failure("GET", key, e),
        }
    }

    /// Encode `value` as JSON and store it, with `ttl_seconds` or the default TTL
    pub async fn set<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: Option<u64>,
    ) -> StoreResponse<()> {
        let encoded = match serde_json::to_string(value) {
            Ok(encoded) => encoded,
            Err(e) => {
                logger::error(
                    LogTag::Cache,
                    &format!("Failed to encode value for key {}: {}", key, e),
                );
                return StoreResponse::Error(format!("encode failed: {}", e));
            }
        };

        let ttl = ttl_seconds.unwrap_or(self.default_ttl_seconds);
        match self.backend.set_ex(key, &encoded, ttl).await {
            Ok(()) => {
                logger::debug(
                    LogTag::Cache,
                    &format!("Cache SET for key: {} (ttl={}s)", key, ttl),
                );
                StoreResponse::Value(())
            }
            Err(e) => self.report_failure("SET", key, e),
        }
    }

    /// Remove `key`; the value says whether anything was removed
    pub async fn delete(&self, key: &str) -> StoreResponse<bool> {
        match self.backend.delete(key).await {
            Ok(removed) => {
                logger::debug(
                    LogTag::Cache,
                    &format!("Cache DELETE for key: {} (removed={})", key, removed),
                );
                StoreResponse::Value(removed)
            }
            Err(e) => self.report_failure("DELETE", key, e),
        }
    }

    pub async fn clear_all(&self) -> StoreResponse<()> {
        match self.backend.flush().await {
            Ok(()) => {
                logger::info(LogTag::Cache, "Cache cleared");
                StoreResponse::Value(())
            }
            Err(e) => self.report_failure("FLUSH", "*", e),
        }
    }

    pub async fn server_info(&self) -> ServerInfo {
        match self.backend.info().await {
            Ok(info) => ServerInfo::available(self.backend.name(), info),
            Err(BackendError::Unavailable(reason)) => ServerInfo::Unavailable {
                message: format!("Cache backend not connected: {}", reason),
            },
            Err(e) => {
                logger::error(LogTag::Cache, &format!("Cache INFO failed: {}", e));
                ServerInfo::Error {
                    message: e.to_string(),
                }
            }
        }
    }

    /// Atomically fold one access into the stats record under `key`
    pub async fn update_stats(
        &self,
        key: &str,
        update: AccessUpdate,
        ttl_seconds: u64,
    ) -> StoreResponse<()> {
        let stamped_at = chrono::Utc::now().to_rfc3339();
        match self
            .backend
            .record_access(key, update, &stamped_at, ttl_seconds)
            .await
        {
            Ok(()) => StoreResponse::Value(()),
            Err(e) => self.report_failure("STATS", key, e),
        }
    }

    fn report_failure<T>(&self, op: &str, key: &str, err: BackendError) -> StoreResponse<T> {
        match &err {
            BackendError::Unavailable(_) => logger::debug(
                LogTag::Cache,
                &format!("Cache {} skipped for key {}: backend unavailable", op, key),
            ),
            _ => logger::error(
                LogTag::Cache,
                &format!("Cache {} error for key {}: {}", op, key, err),
            ),
        }
        StoreResponse::from_backend_error(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::memory::MemoryBackend;
    use async_trait::async_trait;

    /// Backend that fails every call with the configured error
    struct FailingBackend(BackendError);

    #[async_trait]
    impl CacheBackend for FailingBackend {
        fn name(&self) -> &'static str {
            "failing"
        }
        async fn get(&self, _key: &str) -> Result<Option<String>, BackendError> {
            Err(self.0.clone())
        }
        async fn set_ex(&self, _key: &str, _value: &str, _ttl: u64) -> Result<(), BackendError> {
            Err(self.0.clone())
        }
        async fn delete(&self, _key: &str) -> Result<bool, BackendError> {
            Err(self.0.clone())
        }
        async fn flush(&self) -> Result<(), BackendError> {
            Err(self.0.clone())
        }
        async fn info(&self) -> Result<BackendInfo, BackendError> {
            Err(self.0.clone())
        }
        async fn record_access(
            &self,
            _key: &str,
            _update: AccessUpdate,
            _stamped_at: &str,
            _ttl: u64,
        ) -> Result<(), BackendError> {
            Err(self.0.clone())
        }
    }

    fn memory_store() -> KvStore {
        KvStore::new(Arc::new(MemoryBackend::new()), 300)
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let store = memory_store();
        let value = serde_json::json!({"name": "Token", "price": 1.5});

        assert!(store.set("k", &value, None).await.is_value());
        let read: StoreResponse<Option<serde_json::Value>> = store.get("k").await;
        assert_eq!(read, StoreResponse::Value(Some(value)));
    }

    #[tokio::test]
    async fn test_decode_failure_is_miss() {
        let store = memory_store();
        store.set("k", "not a number", None).await;

        let read: StoreResponse<Option<u64>> = store.get("k").await;
        assert_eq!(read, StoreResponse::Value(None));
    }

    #[tokio::test]
    async fn test_delete_reports_removal() {
        let store = memory_store();
        store.set("k", &1u8, Some(60)).await;

        assert_eq!(store.delete("k").await, StoreResponse::Value(true));
        assert_eq!(store.delete("k").await, StoreResponse::Value(false));
    }

    #[tokio::test]
    async fn test_unavailable_backend() {
        let store = KvStore::new(
            Arc::new(FailingBackend(BackendError::Unavailable("refused".to_string()))),
            300,
        );

        let read: StoreResponse<Option<u64>> = store.get("k").await;
        assert_eq!(read, StoreResponse::Unavailable);
        assert_eq!(store.set("k", &1u8, None).await, StoreResponse::Unavailable);
        assert_eq!(store.clear_all().await, StoreResponse::Unavailable);
        assert!(matches!(
            store.server_info().await,
            ServerInfo::Unavailable { .. }
        ));
    }

    #[tokio::test]
    async fn test_command_error() {
        let store = KvStore::new(
            Arc::new(FailingBackend(BackendError::Command("GET: broken pipe".to_string()))),
            300,
        );

        let read: StoreResponse<Option<u64>> = store.get("k").await;
        assert!(matches!(read, StoreResponse::Error(msg) if msg.contains("broken pipe")));
        assert!(matches!(store.server_info().await, ServerInfo::Error { .. }));
    }

    #[tokio::test]
    async fn test_server_info_shape() {
        let store = memory_store();
        let json = serde_json::to_value(store.server_info().await).unwrap();

        assert_eq!(json["status"], "available");
        assert_eq!(json["backend"], "memory");
        assert!(json.get("keyspace_hits").is_some());
    }
}
