pub mod trip;

pub use trip::{SavedTrip, SortBy, Trip, sort_trips};
