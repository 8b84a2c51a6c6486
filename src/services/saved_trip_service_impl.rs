//! Saved trips backed by a [`TripRepository`], with cached list pages.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::cache::{self, CacheStore, keys};
use crate::db::TripRepository;
use crate::domain::{AirportCode, Page};
use crate::models::trip::SavedTrip;
use crate::services::{SavedTripService, TripError, TripLookup};

pub struct CachedSavedTripService {
    repository: Arc<dyn TripRepository>,
    cache: Arc<dyn CacheStore>,
    lookup: Arc<dyn TripLookup>,
    ttl_seconds: u64,
}

impl CachedSavedTripService {
    #[must_use]
    pub fn new(
        repository: Arc<dyn TripRepository>,
        cache: Arc<dyn CacheStore>,
        lookup: Arc<dyn TripLookup>,
        ttl_seconds: u64,
    ) -> Self {
        Self {
            repository,
            cache,
            lookup,
            ttl_seconds,
        }
    }

    /// Drops every cached list page. Runs after the write has committed, so
    /// failures are logged and swallowed.
    async fn invalidate_saved_pages(&self) {
        let keys = match self.cache.keys(keys::SAVED_PAGES_PATTERN).await {
            Ok(keys) => keys,
            Err(e) => {
                warn!(error = %e, "Failed to list saved-trip pages for invalidation");
                return;
            }
        };

        if keys.is_empty() {
            return;
        }

        match self.cache.delete(&keys).await {
            Ok(removed) => {
                metrics::counter!("trip_cache_invalidations_total").increment(removed);
                debug!("Invalidated {} saved-trip pages", removed);
            }
            Err(e) => {
                warn!(error = %e, pages = keys.len(), "Failed to invalidate saved-trip pages");
            }
        }
    }
}

#[async_trait]
impl SavedTripService for CachedSavedTripService {
    async fn save(
        &self,
        id: &str,
        origin: &str,
        destination: &str,
    ) -> Result<SavedTrip, TripError> {
        let origin = AirportCode::parse(origin)?;
        let destination = AirportCode::parse(destination)?;

        let trip = self
            .lookup
            .find(&origin, &destination)
            .await?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| TripError::NotFound(id.to_string()))?;

        if self.repository.find_by_id(id).await?.is_some() {
            return Err(TripError::AlreadySaved(id.to_string()));
        }

        let saved = self.repository.create(&trip).await?;
        info!("Trip {} saved ({} -> {})", id, origin, destination);

        self.invalidate_saved_pages().await;
        Ok(saved)
    }

    async fn list(&self, page: Page) -> Result<Vec<SavedTrip>, TripError> {
        let key = keys::saved_page_key(page);

        if let Some(trips) = cache::get_json::<Vec<SavedTrip>>(self.cache.as_ref(), &key).await {
            metrics::counter!("trip_cache_hits_total", "cache" => "saved").increment(1);
            debug!(key = %key, "Saved-trip page cache hit");
            return Ok(trips);
        }
        metrics::counter!("trip_cache_misses_total", "cache" => "saved").increment(1);

        let trips = self.repository.find_many(page.limit, page.offset).await?;
        cache::put_json(self.cache.as_ref(), &key, &trips, self.ttl_seconds).await;

        Ok(trips)
    }

    async fn delete(&self, id: &str) -> Result<(), TripError> {
        if self.repository.find_by_id(id).await?.is_none() {
            return Err(TripError::NotFound(id.to_string()));
        }

        self.repository.delete(id).await?;
        info!("Saved trip {} removed", id);

        self.invalidate_saved_pages().await;
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<SavedTrip, TripError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| TripError::NotFound(id.to_string()))
    }
}
