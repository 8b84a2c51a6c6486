pub mod error;
pub use error::TripError;

pub mod trip_lookup;
pub use trip_lookup::{CachedTripLookup, TripLookup};

pub mod saved_trip_service;
pub mod saved_trip_service_impl;
pub use saved_trip_service::SavedTripService;
pub use saved_trip_service_impl::CachedSavedTripService;
