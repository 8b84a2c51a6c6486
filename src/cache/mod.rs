//! Key-value cache with expiry, used for cache-aside reads.
//!
//! The services only see [`CacheStore`]. `RedisCache` is the production
//! backend; `MemoryCache` keeps everything in-process and is handy for tests
//! and single-process runs.

pub mod keys;
pub mod memory;
pub mod redis_cache;

pub use memory::MemoryCache;
pub use redis_cache::RedisCache;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Cache unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Returns the stored value, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), CacheError>;

    /// Lists live keys matching a glob `pattern` (`*`, `?`).
    async fn keys(&self, pattern: &str) -> Result<Vec<String>, CacheError>;

    /// Removes `keys`, returning how many existed.
    async fn delete(&self, keys: &[String]) -> Result<u64, CacheError>;
}

/// Reads and decodes a JSON entry. Backend and decode failures are logged and
/// read as a miss, so a sick cache degrades to the source of truth.
pub async fn get_json<T: DeserializeOwned>(cache: &dyn CacheStore, key: &str) -> Option<T> {
    let raw = match cache.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!(key = %key, error = %e, "Cache read failed");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key = %key, error = %e, "Cache entry could not be decoded");
            None
        }
    }
}

/// Best-effort JSON write. Returns whether the entry was stored; failures are
/// logged, never propagated.
pub async fn put_json<T: Serialize + ?Sized>(
    cache: &dyn CacheStore,
    key: &str,
    value: &T,
    ttl_seconds: u64,
) -> bool {
    let payload = match serde_json::to_string(value) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(key = %key, error = %e, "Cache entry could not be encoded");
            return false;
        }
    };

    match cache.set(key, &payload, ttl_seconds).await {
        Ok(()) => true,
        Err(e) => {
            warn!(key = %key, error = %e, "Cache write failed");
            false
        }
    }
}
