//! Domain service for trips the user has saved.

use crate::domain::Page;
use crate::models::trip::SavedTrip;
use crate::services::TripError;

#[async_trait::async_trait]
pub trait SavedTripService: Send + Sync {
    /// Saves the trip `id` found on the `origin` -> `destination` route.
    ///
    /// The route is resolved through the lookup service, so a trip can only
    /// be saved if a search for that route currently returns it.
    async fn save(
        &self,
        id: &str,
        origin: &str,
        destination: &str,
    ) -> Result<SavedTrip, TripError>;

    /// One page of saved trips, newest first.
    async fn list(&self, page: Page) -> Result<Vec<SavedTrip>, TripError>;

    /// Removes a saved trip.
    async fn delete(&self, id: &str) -> Result<(), TripError>;

    async fn get(&self, id: &str) -> Result<SavedTrip, TripError>;
}
