/// In-process cache backend
///
/// Expiring string map guarded by a single mutex. Used when `cache.backend`
/// is "memory" and by tests that need a real backend without a Redis server.
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use super::backend::{AccessUpdate, BackendError, BackendInfo, CacheBackend};
use super::types::CacheStatsRecord;

struct MemoryEntry {
    value: String,
    expires_at: Instant,
}

impl MemoryEntry {
    fn new(value: String, ttl_seconds: u64) -> Self {
        Self {
            value,
            expires_at: Instant::now() + Duration::from_secs(ttl_seconds),
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

#[derive(Default)]
struct MemoryState {
    entries: HashMap<String, MemoryEntry>,
    keyspace_hits: u64,
    keyspace_misses: u64,
}

impl MemoryState {
    /// Live value for `key`, dropping it first when expired
    fn live_value(&mut self, key: &str) -> Option<&str> {
        let expired = self.entries.get(key).map(|e| e.is_expired()).unwrap_or(false);
        if expired {
            self.entries.remove(key);
        }
        self.entries.get(key).map(|e| e.value.as_str())
    }
}

#[derive(Default)]
pub struct MemoryBackend {
    state: Mutex<MemoryState>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        let state = self.state.lock();
        state.entries.values().filter(|e| !e.is_expired()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CacheBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        let mut state = self.state.lock();
        let value = state.live_value(key).map(str::to_string);
        if value.is_some() {
            state.keyspace_hits += 1;
        } else {
            state.keyspace_misses += 1;
        }
        Ok(value)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), BackendError> {
        let mut state = self.state.lock();
        state
            .entries
            .insert(key.to_string(), MemoryEntry::new(value.to_string(), ttl_seconds));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, BackendError> {
        let mut state = self.state.lock();
        let removed = state.entries.remove(key);
        Ok(removed.map(|e| !e.is_expired()).unwrap_or(false))
    }

    async fn flush(&self) -> Result<(), BackendError> {
        self.state.lock().entries.clear();
        Ok(())
    }

    async fn info(&self) -> Result<BackendInfo, BackendError> {
        let state = self.state.lock();
        let used_bytes: usize = state
            .entries
            .iter()
            .map(|(k, e)| k.len() + e.value.len())
            .sum();

        Ok(BackendInfo {
            host: "in-process".to_string(),
            port: 0,
            connected_clients: 1,
            used_memory_human: format_bytes_human(used_bytes),
            keyspace_hits: state.keyspace_hits,
            keyspace_misses: state.keyspace_misses,
        })
    }

    async fn record_access(
        &self,
        key: &str,
        update: AccessUpdate,
        stamped_at: &str,
        ttl_seconds: u64,
    ) -> Result<(), BackendError> {
        let mut state = self.state.lock();

        let mut stats = state
            .live_value(key)
            .and_then(|raw| serde_json::from_str::<CacheStatsRecord>(raw).ok())
            .unwrap_or_default();
        stats.record(update.was_hit, update.elapsed_seconds, stamped_at);

        let encoded =
            serde_json::to_string(&stats).map_err(|e| BackendError::Decode(e.to_string()))?;
        state
            .entries
            .insert(key.to_string(), MemoryEntry::new(encoded, ttl_seconds));
        Ok(())
    }
}

/// Format a byte count the way Redis reports `used_memory_human`
fn format_bytes_human(bytes: usize) -> String {
    const UNITS: [&str; 4] = ["B", "K", "M", "G"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{}B", bytes)
    } else {
        format!("{:.2}{}", value, UNITS[unit])
    }
}
