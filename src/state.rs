use anyhow::Context;
use std::sync::Arc;
use tracing::info;

use crate::cache::{CacheStore, MemoryCache, RedisCache};
use crate::clients::{HttpTripProvider, TripProvider};
use crate::config::{CacheBackend, Config};
use crate::db::Store;
use crate::services::{
    CachedSavedTripService, CachedTripLookup, SavedTripService, TripLookup,
};

/// Build a shared HTTP client with reasonable defaults for provider calls.
fn build_shared_http_client(config: &Config) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config.request_timeout())
        .user_agent(concat!("tripfinder/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

/// Connects the configured cache backend. An unreachable Redis is fatal.
async fn build_cache(config: &Config) -> anyhow::Result<Arc<dyn CacheStore>> {
    match config.cache.backend {
        CacheBackend::Redis => {
            let cache = RedisCache::connect(&config.cache.redis_url).await?;
            info!("Using Redis cache");
            Ok(Arc::new(cache))
        }
        CacheBackend::Memory => {
            info!("Using in-process cache");
            Ok(Arc::new(MemoryCache::new()))
        }
    }
}

#[derive(Clone)]
pub struct SharedState {
    pub store: Store,

    pub trip_lookup: Arc<dyn TripLookup>,

    pub saved_trips: Arc<dyn SavedTripService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let http_client = build_shared_http_client(&config)?;
        let provider = Arc::new(
            HttpTripProvider::with_shared_client(
                http_client,
                &config.provider.base_url,
                config.provider.api_key.clone(),
            )
            .context("Invalid trip provider configuration")?,
        );

        let store = Store::with_pool_options(
            &config.database.url,
            config.database.max_connections,
            config.database.min_connections,
        )
        .await
        .context("Failed to open database")?;

        let cache = build_cache(&config).await?;

        Self::from_parts(&config, store, cache, provider)
    }

    /// Wires the services over already-built backends.
    pub fn from_parts(
        config: &Config,
        store: Store,
        cache: Arc<dyn CacheStore>,
        provider: Arc<dyn TripProvider>,
    ) -> anyhow::Result<Self> {
        let retry = config.retry_policy()?;

        let trip_lookup = Arc::new(CachedTripLookup::new(
            provider,
            cache.clone(),
            retry,
            config.cache.search_ttl_seconds,
        )) as Arc<dyn TripLookup>;

        let saved_trips = Arc::new(CachedSavedTripService::new(
            Arc::new(store.trips()),
            cache,
            trip_lookup.clone(),
            config.cache.saved_ttl_seconds,
        )) as Arc<dyn SavedTripService>;

        Ok(Self {
            store,
            trip_lookup,
            saved_trips,
        })
    }
}
