mod remove;
mod save;
mod saved;
mod search;
mod show;

pub use remove::cmd_remove_trip;
pub use save::cmd_save_trip;
pub use saved::cmd_list_saved;
pub use search::cmd_search_trips;
pub use show::cmd_show_trip;

use crate::models::trip::Trip;
use crate::services::TripError;

/// `1140` -> `19h 00m`
fn format_duration(minutes: u64) -> String {
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}

fn print_trip(trip: &Trip) {
    println!("• {} [{}]", trip.display_name, trip.trip_type);
    println!(
        "  ID: {} | {} -> {} | Cost: {} | Duration: {}",
        trip.id,
        trip.origin,
        trip.destination,
        trip.cost,
        format_duration(trip.duration)
    );
}

/// `[TRIP_NOT_FOUND] Trip not found: t1`
fn describe(err: &TripError) -> String {
    format!("[{}] {err}", err.kind())
}

/// Prints caller mistakes and passes everything else up.
fn report(err: TripError) -> anyhow::Result<()> {
    if err.is_client_error() {
        println!("{}", describe(&err));
        Ok(())
    } else {
        let context = format!("[{}] Request failed", err.kind());
        Err(anyhow::Error::new(err).context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_as_hours() {
        assert_eq!(format_duration(0), "0h 00m");
        assert_eq!(format_duration(59), "0h 59m");
        assert_eq!(format_duration(1140), "19h 00m");
        assert_eq!(format_duration(1505), "25h 05m");
    }

    #[test]
    fn client_errors_are_printed_not_propagated() {
        assert!(report(TripError::NotFound("t1".into())).is_ok());
        assert!(report(TripError::Database("locked".into())).is_err());
    }

    #[test]
    fn errors_carry_their_kind() {
        assert_eq!(
            describe(&TripError::NotFound("t1".into())),
            "[TRIP_NOT_FOUND] Trip not found: t1"
        );
        assert_eq!(
            describe(&TripError::UnsupportedAirport("XYZ".into())),
            "[UNSUPPORTED_AIRPORT] Unsupported airport: XYZ"
        );

        let err = report(TripError::FetchFailed {
            attempts: 3,
            message: "Trip provider returned 503: busy".into(),
        })
        .unwrap_err();
        assert_eq!(
            format!("{err:#}"),
            "[FETCH_RETRY_FAILED] Request failed: Trip search failed after 3 attempts: Trip provider returned 503: busy"
        );
    }
}
