use crate::services::SavedTripService;
use crate::state::SharedState;

use super::{print_trip, report};

pub async fn cmd_show_trip(state: &SharedState, id: &str) -> anyhow::Result<()> {
    match state.saved_trips.get(id).await {
        Ok(saved) => {
            print_trip(&saved.trip);
            println!("  Saved: {}", saved.created_at.to_rfc3339());
            Ok(())
        }
        Err(e) => report(e),
    }
}
