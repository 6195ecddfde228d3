/// Redis cache backend
///
/// Connection is attempted once at startup. When it fails the backend stays
/// in the `Unavailable` state for the rest of the process and every
/// operation reports [`BackendError::Unavailable`] without touching the
/// network. Every command is bounded by `cache.operation_timeout_seconds`.
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, RedisResult, Script};
use std::future::Future;
use std::time::Duration;

use super::backend::{AccessUpdate, BackendError, BackendInfo, CacheBackend};
use crate::config::CacheConfig;
use crate::logger::{self, LogTag};

/// Atomic read-modify-write of a stats record.
///
/// KEYS[1] = stats key
/// ARGV = was_hit ("1"/"0"), elapsed seconds, RFC 3339 timestamp, ttl seconds
const RECORD_ACCESS_SCRIPT: &str = r#"
local hits, misses, total, avg = 0, 0, 0, 0
local raw = redis.call('GET', KEYS[1])
if raw then
    local ok, stats = pcall(cjson.decode, raw)
    if ok and type(stats) == 'table' then
        hits = tonumber(stats.hits) or 0
        misses = tonumber(stats.misses) or 0
        total = tonumber(stats.total_requests) or 0
        avg = tonumber(stats.avg_response_time) or 0
    end
end

total = total + 1
if ARGV[1] == '1' then
    hits = hits + 1
else
    misses = misses + 1
end
avg = (avg * (total - 1) + tonumber(ARGV[2])) / total

local encoded = cjson.encode({
    hits = hits,
    misses = misses,
    total_requests = total,
    avg_response_time = avg,
    last_updated = ARGV[3],
})
redis.call('SET', KEYS[1], encoded, 'EX', tonumber(ARGV[4]))
return total
"#;

enum ConnectionState {
    Connected(ConnectionManager),
    Unavailable { reason: String },
}

pub struct RedisBackend {
    state: ConnectionState,
    host: String,
    port: u16,
    operation_timeout: Duration,
    record_access_script: Script,
}

impl RedisBackend {
    /// Connect using the cache settings
    ///
    /// Never fails: a refused or timed out connection yields a backend in
    /// degraded mode and an error log line.
    pub async fn connect(config: &CacheConfig) -> Self {
        let state = match Self::open_connection(config).await {
            Ok(manager) => {
                logger::info(
                    LogTag::Cache,
                    &format!(
                        "Connected to Redis at {}:{} (db {})",
                        config.redis_host, config.redis_port, config.redis_db
                    ),
                );
                ConnectionState::Connected(manager)
            }
            Err(reason) => {
                logger::error(
                    LogTag::Cache,
                    &format!(
                        "Redis unavailable at {}:{}: {} - continuing without cache",
                        config.redis_host, config.redis_port, reason
                    ),
                );
                ConnectionState::Unavailable { reason }
            }
        };

        Self {
            state,
            host: config.redis_host.clone(),
            port: config.redis_port,
            operation_timeout: Duration::from_secs(config.operation_timeout_seconds.max(1)),
            record_access_script: Script::new(RECORD_ACCESS_SCRIPT),
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self.state, ConnectionState::Connected(_))
    }

    async fn open_connection(config: &CacheConfig) -> Result<ConnectionManager, String> {
        let url = build_redis_url(config)?;
        let client = redis::Client::open(url.as_str())
            .map_err(|e| format!("Invalid Redis URL: {}", e))?;

        let connect_timeout = Duration::from_secs(config.connect_timeout_seconds.max(1));
        let mut manager = tokio::time::timeout(connect_timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| format!("connection timed out after {}s", connect_timeout.as_secs()))?
            .map_err(|e| format!("connection failed: {}", e))?;

        let pong = tokio::time::timeout(
            connect_timeout,
            redis::cmd("PING").query_async::<_, String>(&mut manager),
        )
        .await
        .map_err(|_| "PING timed out".to_string())?
        .map_err(|e| format!("PING failed: {}", e))?;
        logger::debug(LogTag::Cache, &format!("Redis PING -> {}", pong));

        Ok(manager)
    }

    fn connection(&self) -> Result<ConnectionManager, BackendError> {
        match &self.state {
            ConnectionState::Connected(manager) => Ok(manager.clone()),
            ConnectionState::Unavailable { reason } => Err(BackendError::Unavailable(reason.clone())),
        }
    }

    /// Run one command under the operation timeout
    async fn run<T, F>(&self, command: &str, fut: F) -> Result<T, BackendError>
    where
        F: Future<Output = RedisResult<T>>,
    {
        match tokio::time::timeout(self.operation_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(BackendError::Command(format!("{}: {}", command, e))),
            Err(_) => Err(BackendError::Timeout(self.operation_timeout.as_secs())),
        }
    }
}

#[async_trait]
impl CacheBackend for RedisBackend {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        let mut conn = self.connection()?;
        self.run("GET", async move { conn.get::<_, Option<String>>(key).await })
            .await
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), BackendError> {
        let mut conn = self.connection()?;
        self.run("SET", async move {
            redis::cmd("SET")
                .arg(key)
                .arg(value)
                .arg("EX")
                .arg(ttl_seconds)
                .query_async::<_, ()>(&mut conn)
                .await
        })
        .await
    }

    async fn delete(&self, key: &str) -> Result<bool, BackendError> {
        let mut conn = self.connection()?;
        let removed: u64 = self
            .run("DEL", async move { conn.del::<_, u64>(key).await })
            .await?;
        Ok(removed > 0)
    }

    async fn flush(&self) -> Result<(), BackendError> {
        let mut conn = self.connection()?;
        self.run("FLUSHDB", async move {
            redis::cmd("FLUSHDB").query_async::<_, ()>(&mut conn).await
        })
        .await
    }

    async fn info(&self) -> Result<BackendInfo, BackendError> {
        let mut conn = self.connection()?;
        let raw: String = self
            .run("INFO", async move {
                redis::cmd("INFO").query_async::<_, String>(&mut conn).await
            })
            .await?;
        Ok(parse_info(&raw, &self.host, self.port))
    }

    async fn record_access(
        &self,
        key: &str,
        update: AccessUpdate,
        stamped_at: &str,
        ttl_seconds: u64,
    ) -> Result<(), BackendError> {
        let mut conn = self.connection()?;
        let mut invocation = self.record_access_script.key(key);
        invocation
            .arg(if update.was_hit { "1" } else { "0" })
            .arg(update.elapsed_seconds)
            .arg(stamped_at)
            .arg(ttl_seconds);

        let total: i64 = self
            .run("EVALSHA", async move { invocation.invoke_async::<_, i64>(&mut conn).await })
            .await?;
        logger::verbose(
            LogTag::Cache,
            &format!("Stats updated for {} (total_requests={})", key, total),
        );
        Ok(())
    }
}

/// `redis://[:password@]host:port/db`
fn build_redis_url(config: &CacheConfig) -> Result<url::Url, String> {
    let mut url = url::Url::parse(&format!(
        "redis://{}:{}/{}",
        config.redis_host, config.redis_port, config.redis_db
    ))
    .map_err(|e| format!("Invalid Redis address: {}", e))?;

    if !config.redis_password.is_empty() {
        url.set_password(Some(&config.redis_password))
            .map_err(|_| "Redis password cannot be set on this URL".to_string())?;
    }

    Ok(url)
}

/// Extract the fields we report from the `INFO` bulk reply
fn parse_info(raw: &str, host: &str, port: u16) -> BackendInfo {
    let mut info = BackendInfo {
        host: host.to_string(),
        port,
        connected_clients: 0,
        used_memory_human: "0B".to_string(),
        keyspace_hits: 0,
        keyspace_misses: 0,
    };

    for line in raw.lines() {
        let Some((field, value)) = line.trim().split_once(':') else {
            continue;
        };
        match field {
            "connected_clients" => info.connected_clients = value.parse().unwrap_or(0),
            "used_memory_human" => info.used_memory_human = value.to_string(),
            "keyspace_hits" => info.keyspace_hits = value.parse().unwrap_or(0),
            "keyspace_misses" => info.keyspace_misses = value.parse().unwrap_or(0),
            _ => {}
        }
    }

    info
}
