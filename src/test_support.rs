//! Fakes for the service seams, shared by unit tests.

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::cache::{CacheError, CacheStore, MemoryCache};
use crate::clients::{FetchError, TripProvider};
use crate::db::{RepositoryError, TripRepository};
use crate::models::trip::{SavedTrip, SortBy, Trip};

pub fn trip(id: &str, origin: &str, destination: &str, cost: u64, duration: u64) -> Trip {
    Trip {
        id: id.to_string(),
        origin: origin.to_string(),
        destination: destination.to_string(),
        cost,
        duration,
        trip_type: "flight".to_string(),
        display_name: format!("{origin} to {destination} ({id})"),
    }
}

/// Provider returning a fixed result set after `fail_first` 503s.
pub struct FakeProvider {
    trips: Vec<Trip>,
    fail_first: u32,
    calls: AtomicU32,
    last_sort: Mutex<Option<SortBy>>,
}

impl FakeProvider {
    pub fn returning(trips: Vec<Trip>) -> Self {
        Self {
            trips,
            fail_first: 0,
            calls: AtomicU32::new(0),
            last_sort: Mutex::new(None),
        }
    }

    pub fn failing_first(mut self, n: u32) -> Self {
        self.fail_first = n;
        self
    }

    pub fn always_failing() -> Self {
        Self::returning(Vec::new()).failing_first(u32::MAX)
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_sort(&self) -> Option<SortBy> {
        *self.last_sort.lock().unwrap()
    }
}

#[async_trait]
impl TripProvider for FakeProvider {
    async fn fetch_trips(
        &self,
        _origin: &str,
        _destination: &str,
        sort: SortBy,
    ) -> Result<Vec<Trip>, FetchError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        *self.last_sort.lock().unwrap() = Some(sort);

        if call <= self.fail_first {
            return Err(FetchError::Status {
                status: 503,
                body: format!("unavailable (call {call})"),
            });
        }
        Ok(self.trips.clone())
    }
}

/// In-memory cache that counts calls and can be told to fail per operation.
#[derive(Default)]
pub struct FlakyCache {
    inner: MemoryCache,
    pub fail_get: AtomicBool,
    pub fail_set: AtomicBool,
    pub fail_keys: AtomicBool,
    pub fail_delete: AtomicBool,
    pub gets: AtomicU32,
    pub sets: AtomicU32,
    pub keys_calls: AtomicU32,
    pub deleted: Mutex<Vec<String>>,
}

impl FlakyCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inner(&self) -> &MemoryCache {
        &self.inner
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    fn check(flag: &AtomicBool, op: &str) -> Result<(), CacheError> {
        if flag.load(Ordering::SeqCst) {
            Err(CacheError::Unavailable(format!("{op} refused")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CacheStore for FlakyCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        Self::check(&self.fail_get, "get")?;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), CacheError> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        Self::check(&self.fail_set, "set")?;
        self.inner.set(key, value, ttl_seconds).await
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>, CacheError> {
        self.keys_calls.fetch_add(1, Ordering::SeqCst);
        Self::check(&self.fail_keys, "keys")?;
        self.inner.keys(pattern).await
    }

    async fn delete(&self, keys: &[String]) -> Result<u64, CacheError> {
        Self::check(&self.fail_delete, "delete")?;
        self.deleted.lock().unwrap().extend(keys.iter().cloned());
        self.inner.delete(keys).await
    }
}

/// Vector-backed repository. Each create is stamped one second after the
/// previous one so ordering is deterministic.
#[derive(Default)]
pub struct FakeRepository {
    rows: Mutex<Vec<SavedTrip>>,
    pub fail: AtomicBool,
    pub find_many_calls: AtomicU32,
    pub delete_calls: AtomicU32,
}

impl FakeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> Vec<String> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .map(|s| s.trip.id.clone())
            .collect()
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if self.fail.load(Ordering::SeqCst) {
            Err(RepositoryError::Database("database is locked".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl TripRepository for FakeRepository {
    async fn create(&self, trip: &Trip) -> Result<SavedTrip, RepositoryError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|s| s.trip.id == trip.id) {
            return Err(RepositoryError::Duplicate(trip.id.clone()));
        }

        let offset = i64::try_from(rows.len()).unwrap_or_default();
        let saved = SavedTrip {
            trip: trip.clone(),
            created_at: Utc::now() + ChronoDuration::seconds(offset),
        };
        rows.push(saved.clone());
        Ok(saved)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<SavedTrip>, RepositoryError> {
        self.check()?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.trip.id == id)
            .cloned())
    }

    async fn find_many(&self, limit: u64, offset: u64) -> Result<Vec<SavedTrip>, RepositoryError> {
        self.find_many_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .collect())
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.rows.lock().unwrap().retain(|s| s.trip.id != id);
        Ok(())
    }
}
