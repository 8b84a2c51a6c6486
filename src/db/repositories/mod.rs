pub mod saved_trip;

pub use saved_trip::SavedTripRepository;
