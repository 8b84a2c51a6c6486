use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::constants;
use crate::retry::RetryPolicy;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub provider: ProviderConfig,

    pub retry: RetryConfig,

    pub cache: CacheConfig,

    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,

    pub log_format: LogFormat,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            worker_threads: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Trip search endpoint; `origin`, `destination` and `sort_by` are
    /// appended as query parameters.
    pub base_url: String,

    /// Sent as `x-api-key`. Usually supplied through `TRIPFINDER_API_KEY`
    /// rather than written to disk.
    pub api_key: String,

    /// Request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: constants::provider::DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            request_timeout_seconds: constants::provider::REQUEST_TIMEOUT_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,

    /// Wait after attempt `n` is `base_delay_ms * n`.
    pub base_delay_ms: u64,

    /// Upper bound on a whole lookup, retries included. Unset means only the
    /// attempt count limits it.
    pub deadline_seconds: Option<u64>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: constants::retry::MAX_ATTEMPTS,
            base_delay_ms: constants::retry::BASE_DELAY_MS,
            deadline_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    #[default]
    Redis,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub backend: CacheBackend,

    pub redis_url: String,

    /// TTL for search results, in seconds (default: 3600)
    pub search_ttl_seconds: u64,

    /// TTL for saved-trip list pages, in seconds (default: 300)
    pub saved_ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Redis,
            redis_url: constants::cache::DEFAULT_REDIS_URL.to_string(),
            search_ttl_seconds: constants::cache::SEARCH_TTL_SECONDS,
            saved_ttl_seconds: constants::cache::SAVED_TTL_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,

    /// Maximum database connections (default: 5)
    pub max_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:data/tripfinder.db".to_string(),
            max_connections: 5,
            min_connections: 1,
        }
    }
}

impl Config {
    /// Loads the first config file found, then applies environment overrides.
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        let mut config = None;
        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                config = Some(Self::load_from_path(path)?);
                break;
            }
        }

        let mut config = config.unwrap_or_else(|| {
            info!("No config file found, using defaults");
            Self::default()
        });
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("tripfinder").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".tripfinder").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies overrides from `lookup`; empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(constants::env::API_KEY) {
            self.provider.api_key = key;
        }
        if let Some(url) = get(constants::env::REDIS_URL) {
            self.cache.redis_url = url;
        }
        if let Some(url) = get(constants::env::DATABASE_URL) {
            self.database.url = url;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.retry.max_attempts == 0 {
            anyhow::bail!("retry.max_attempts must be at least 1");
        }

        if self.retry.deadline_seconds == Some(0) {
            anyhow::bail!("retry.deadline_seconds must be > 0 when set");
        }

        if self.provider.base_url.trim().is_empty() {
            anyhow::bail!("provider.base_url cannot be empty");
        }

        if self.provider.request_timeout_seconds == 0 {
            anyhow::bail!("provider.request_timeout_seconds must be > 0");
        }

        if self.cache.search_ttl_seconds == 0 || self.cache.saved_ttl_seconds == 0 {
            anyhow::bail!("Cache TTLs must be > 0");
        }

        if self.cache.backend == CacheBackend::Redis && self.cache.redis_url.trim().is_empty() {
            anyhow::bail!("cache.redis_url cannot be empty when the redis backend is selected");
        }

        if self.database.min_connections > self.database.max_connections {
            anyhow::bail!(
                "database.min_connections ({}) exceeds max_connections ({})",
                self.database.min_connections,
                self.database.max_connections
            );
        }

        Ok(())
    }

    pub fn retry_policy(&self) -> Result<RetryPolicy> {
        let policy = RetryPolicy::new(
            self.retry.max_attempts,
            Duration::from_millis(self.retry.base_delay_ms),
        )
        .context("Invalid retry configuration")?;

        Ok(match self.retry.deadline_seconds {
            Some(secs) => policy.with_deadline(Duration::from_secs(secs)),
            None => policy,
        })
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.provider.request_timeout_seconds)
    }
}
