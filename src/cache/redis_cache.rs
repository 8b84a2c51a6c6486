use anyhow::{Context, Result};
use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::{CacheError, CacheStore};

/// Shared Redis connection manager guarded by a Tokio mutex.
pub type SharedRedis = Arc<Mutex<ConnectionManager>>;

const SCAN_BATCH: usize = 100;

#[derive(Clone)]
pub struct RedisCache {
    redis: SharedRedis,
}

impl RedisCache {
    #[must_use]
    pub const fn new(redis: SharedRedis) -> Self {
        Self { redis }
    }

    /// Connects and pings the server. Fails if Redis is unreachable.
    pub async fn connect(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url).context("failed to parse Redis URL")?;
        let mut manager = ConnectionManager::new(client)
            .await
            .context("failed to initialize Redis connection manager")?;

        let _: String = redis::cmd("PING")
            .query_async(&mut manager)
            .await
            .context("Redis did not answer PING")?;

        info!("Connected to Redis cache");
        Ok(Self::new(Arc::new(Mutex::new(manager))))
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.redis.lock().await;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), CacheError> {
        let mut conn = self.redis.lock().await;
        conn.set_ex::<_, _, ()>(key, value, ttl_seconds).await?;
        debug!(key = %key, ttl = ttl_seconds, "Cache set");
        Ok(())
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>, CacheError> {
        let mut conn = self.redis.lock().await;
        let mut cursor: u64 = 0;
        let mut keys = Vec::new();

        // SCAN rather than KEYS so a large keyspace never blocks the server.
        loop {
            let (next_cursor, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut *conn)
                .await?;

            keys.extend(batch);

            cursor = next_cursor;
            if cursor == 0 {
                break;
            }
        }

        // SCAN may return a key more than once.
        keys.sort();
        keys.dedup();
        Ok(keys)
    }

    async fn delete(&self, keys: &[String]) -> Result<u64, CacheError> {
        if keys.is_empty() {
            return Ok(0);
        }

        let mut conn = self.redis.lock().await;
        let removed: u64 = redis::cmd("DEL").arg(keys).query_async(&mut *conn).await?;

        debug!(count = removed, "Cache delete");
        Ok(removed)
    }
}
