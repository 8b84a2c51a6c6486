use crate::services::SavedTripService;
use crate::state::SharedState;

use super::report;

pub async fn cmd_remove_trip(state: &SharedState, id: &str) -> anyhow::Result<()> {
    match state.saved_trips.delete(id).await {
        Ok(()) => {
            println!("✓ Removed saved trip {id}");
            Ok(())
        }
        Err(e) => report(e),
    }
}
