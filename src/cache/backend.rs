/// Cache backend abstraction
///
/// A backend moves JSON text in and out of a key-value server. It knows
/// nothing about records or namespaces; that lives in the store adapter and
/// the cache manager above it.
use async_trait::async_trait;
use serde::Serialize;

/// Failure of a single backend operation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BackendError {
    /// The backend was never connected (degraded mode)
    #[error("cache backend unavailable: {0}")]
    Unavailable(String),

    #[error("cache operation timed out after {0}s")]
    Timeout(u64),

    #[error("cache command failed: {0}")]
    Command(String),

    /// Stored bytes could not be interpreted
    #[error("cache value decode failed: {0}")]
    Decode(String),
}

/// Server statistics reported by a connected backend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackendInfo {
    pub host: String,
    pub port: u16,
    pub connected_clients: u64,
    pub used_memory_human: String,
    pub keyspace_hits: u64,
    pub keyspace_misses: u64,
}

/// Outcome of an atomic stats update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccessUpdate {
    pub was_hit: bool,
    pub elapsed_seconds: f64,
}

#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Short backend name for logs ("redis", "memory")
    fn name(&self) -> &'static str;

    /// Raw value stored under `key`, `None` when absent or expired
    async fn get(&self, key: &str) -> Result<Option<String>, BackendError>;

    /// Store `value` under `key`, expiring after `ttl_seconds`
    async fn set_ex(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), BackendError>;

    /// Remove `key`; returns whether a key was actually removed
    async fn delete(&self, key: &str) -> Result<bool, BackendError>;

    /// Remove every key in the selected database
    async fn flush(&self) -> Result<(), BackendError>;

    async fn info(&self) -> Result<BackendInfo, BackendError>;

    /// Apply one access to the stats record stored under `key` as a single
    /// atomic read-modify-write, refreshing its TTL. `stamped_at` is the
    /// RFC 3339 timestamp written to `last_updated`.
    async fn record_access(
        &self,
        key: &str,
        update: AccessUpdate,
        stamped_at: &str,
        ttl_seconds: u64,
    ) -> Result<(), BackendError>;
}
