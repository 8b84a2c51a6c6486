use thiserror::Error;

use crate::clients::FetchError;
use crate::db::RepositoryError;
use crate::domain::UnsupportedAirport;
use crate::retry::RetryError;

/// Errors surfaced by the lookup and saved-trip services.
///
/// Input and existence checks run before anything is written, so a
/// client-side error never leaves partial state behind.
#[derive(Debug, Error)]
pub enum TripError {
    #[error("Unsupported airport: {0}")]
    UnsupportedAirport(String),

    #[error("Trip search failed after {attempts} attempts: {message}")]
    FetchFailed { attempts: u32, message: String },

    #[error("Trip not found: {0}")]
    NotFound(String),

    #[error("Trip already saved: {0}")]
    AlreadySaved(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl TripError {
    /// Stable machine-readable code.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UnsupportedAirport(_) => "UNSUPPORTED_AIRPORT",
            Self::FetchFailed { .. } => "FETCH_RETRY_FAILED",
            Self::NotFound(_) => "TRIP_NOT_FOUND",
            Self::AlreadySaved(_) => "TRIP_ALREADY_SAVED",
            Self::Database(_) => "DB_ERROR",
        }
    }

    /// True for errors caused by the caller's input rather than a dependency.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedAirport(_) | Self::NotFound(_) | Self::AlreadySaved(_)
        )
    }
}

impl From<UnsupportedAirport> for TripError {
    fn from(err: UnsupportedAirport) -> Self {
        Self::UnsupportedAirport(err.0)
    }
}

impl From<RetryError<FetchError>> for TripError {
    fn from(err: RetryError<FetchError>) -> Self {
        Self::FetchFailed {
            attempts: err.attempts(),
            message: err.last_message(),
        }
    }
}

impl From<RepositoryError> for TripError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Duplicate(id) => Self::AlreadySaved(id),
            RepositoryError::Database(msg) => Self::Database(msg),
        }
    }
}
