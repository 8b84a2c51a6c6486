use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One itinerary as returned by the trip provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Trip {
    pub id: String,

    pub origin: String,

    pub destination: String,

    /// Smallest currency unit.
    pub cost: u64,

    /// Minutes.
    pub duration: u64,

    #[serde(rename = "type")]
    pub trip_type: String,

    pub display_name: String,
}

/// A trip persisted by the user. `created_at` is assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SavedTrip {
    #[serde(flatten)]
    pub trip: Trip,

    pub created_at: DateTime<Utc>,
}

impl SavedTrip {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.trip.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Fastest,
    Cheapest,
}

impl SortBy {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fastest => "fastest",
            Self::Cheapest => "cheapest",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fastest" => Ok(Self::Fastest),
            "cheapest" => Ok(Self::Cheapest),
            other => Err(format!(
                "Invalid sort order: {other}. Expected 'fastest' or 'cheapest'"
            )),
        }
    }
}

/// Returns a sorted copy of `trips`.
///
/// `Fastest` orders by duration, then cost. `Cheapest` orders by cost, then
/// duration. The sort is stable, so fully tied trips keep their input order.
#[must_use]
pub fn sort_trips(trips: &[Trip], by: SortBy) -> Vec<Trip> {
    let mut sorted = trips.to_vec();
    match by {
        SortBy::Fastest => sorted.sort_by_key(|t| (t.duration, t.cost)),
        SortBy::Cheapest => sorted.sort_by_key(|t| (t.cost, t.duration)),
    }
    sorted
}
