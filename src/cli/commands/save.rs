use crate::services::SavedTripService;
use crate::state::SharedState;

use super::{print_trip, report};

pub async fn cmd_save_trip(
    state: &SharedState,
    id: &str,
    origin: &str,
    destination: &str,
) -> anyhow::Result<()> {
    match state.saved_trips.save(id, origin, destination).await {
        Ok(saved) => {
            println!("✓ Saved trip {}", saved.id());
            print_trip(&saved.trip);
            Ok(())
        }
        Err(e) => report(e),
    }
}
