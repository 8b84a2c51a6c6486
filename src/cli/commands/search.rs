//! Trip search command handler

use crate::models::trip::SortBy;
use crate::services::TripLookup;
use crate::state::SharedState;

use super::{print_trip, report};

pub async fn cmd_search_trips(
    state: &SharedState,
    origin: &str,
    destination: &str,
    sort: SortBy,
) -> anyhow::Result<()> {
    let trips = match state.trip_lookup.search(origin, destination, sort).await {
        Ok(trips) => trips,
        Err(e) => return report(e),
    };

    if trips.is_empty() {
        println!("No trips found.");
        return Ok(());
    }

    println!(
        "Trips {} -> {} ({} found, {})",
        origin.trim().to_uppercase(),
        destination.trim().to_uppercase(),
        trips.len(),
        sort
    );
    println!("{:-<70}", "");

    for trip in &trips {
        print_trip(trip);
    }

    println!();
    println!("Save one with: tripfinder save <id> <origin> <destination>");

    Ok(())
}
