pub use super::saved_trips::Entity as SavedTrips;
