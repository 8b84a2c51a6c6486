pub mod trips;

pub use trips::{FetchError, HttpTripProvider, TripProvider};
