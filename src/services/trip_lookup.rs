//! Cache-aside trip search.
//!
//! Results for an origin/destination pair are served from the cache when
//! present. On a miss the provider is called through the retry policy and
//! the result is written back with a TTL.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use crate::cache::{self, CacheStore, keys};
use crate::clients::TripProvider;
use crate::domain::AirportCode;
use crate::models::trip::{SortBy, Trip, sort_trips};
use crate::retry::RetryPolicy;
use crate::services::TripError;

#[async_trait]
pub trait TripLookup: Send + Sync {
    /// Trips between two already-normalized airport codes, in provider
    /// order. Codes are used verbatim to build the cache key.
    async fn find(&self, origin: &str, destination: &str) -> Result<Vec<Trip>, TripError>;

    /// Normalizes and validates both codes, then returns the trips ordered
    /// by `sort`. Unsupported codes fail before the cache or provider is
    /// touched.
    async fn search(
        &self,
        origin: &str,
        destination: &str,
        sort: SortBy,
    ) -> Result<Vec<Trip>, TripError> {
        let origin = AirportCode::parse(origin)?;
        let destination = AirportCode::parse(destination)?;

        let trips = self.find(&origin, &destination).await?;
        Ok(sort_trips(&trips, sort))
    }
}

pub struct CachedTripLookup {
    provider: Arc<dyn TripProvider>,
    cache: Arc<dyn CacheStore>,
    retry: RetryPolicy,
    ttl_seconds: u64,
}

impl CachedTripLookup {
    #[must_use]
    pub fn new(
        provider: Arc<dyn TripProvider>,
        cache: Arc<dyn CacheStore>,
        retry: RetryPolicy,
        ttl_seconds: u64,
    ) -> Self {
        Self {
            provider,
            cache,
            retry,
            ttl_seconds,
        }
    }
}

#[async_trait]
impl TripLookup for CachedTripLookup {
    async fn find(&self, origin: &str, destination: &str) -> Result<Vec<Trip>, TripError> {
        let key = keys::search_key(origin, destination);

        if let Some(trips) = cache::get_json::<Vec<Trip>>(self.cache.as_ref(), &key).await {
            metrics::counter!("trip_cache_hits_total", "cache" => "search").increment(1);
            debug!(key = %key, count = trips.len(), "Trip cache hit");
            return Ok(trips);
        }

        metrics::counter!("trip_cache_misses_total", "cache" => "search").increment(1);
        debug!(key = %key, "Trip cache miss, querying provider");

        let provider: &dyn TripProvider = self.provider.as_ref();
        let trips = self
            .retry
            .execute(move || provider.fetch_trips(origin, destination, SortBy::Fastest))
            .await?;

        info!(
            "Fetched {} trips for {} -> {}",
            trips.len(),
            origin,
            destination
        );

        cache::put_json(self.cache.as_ref(), &key, &trips, self.ttl_seconds).await;

        Ok(trips)
    }
}
