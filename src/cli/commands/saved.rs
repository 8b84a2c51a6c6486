//! Saved trips listing

use crate::domain::Page;
use crate::services::SavedTripService;
use crate::state::SharedState;

use super::{print_trip, report};

pub async fn cmd_list_saved(
    state: &SharedState,
    limit: Option<u64>,
    offset: Option<u64>,
) -> anyhow::Result<()> {
    let page = Page::bounded(limit, offset);

    let saved = match state.saved_trips.list(page).await {
        Ok(saved) => saved,
        Err(e) => return report(e),
    };

    if saved.is_empty() {
        if page.offset == 0 {
            println!("No saved trips.");
            println!();
            println!("Save one with: tripfinder save <id> <origin> <destination>");
        } else {
            println!("No saved trips at offset {}.", page.offset);
        }
        return Ok(());
    }

    println!("Saved Trips ({})", page);
    println!("{:-<70}", "");

    for entry in &saved {
        print_trip(&entry.trip);
        println!("  Saved: {}", entry.created_at.format("%Y-%m-%d %H:%M"));
    }

    Ok(())
}
