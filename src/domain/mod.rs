//! Domain primitives shared by the lookup and persistence services.

pub mod airport;

pub use airport::{AirportCode, SUPPORTED_AIRPORTS, UnsupportedAirport, is_supported_airport};

use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_PAGE_LIMIT: u64 = 20;

pub const MAX_PAGE_LIMIT: u64 = 100;

/// A `(limit, offset)` window over the saved trips, newest first.
///
/// The service trusts whatever it is given; boundaries (the CLI) should build
/// pages through [`Page::bounded`] so the limit stays within
/// `1..=MAX_PAGE_LIMIT`.
///
/// # Examples
///
/// ```rust
/// use tripfinder::domain::Page;
///
/// let page = Page::bounded(Some(500), None);
/// assert_eq!(page.limit, 100);
/// assert_eq!(page.offset, 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Page {
    pub limit: u64,
    pub offset: u64,
}

impl Page {
    #[must_use]
    pub const fn new(limit: u64, offset: u64) -> Self {
        Self { limit, offset }
    }

    /// Applies defaults for missing values and clamps the limit.
    #[must_use]
    pub fn bounded(limit: Option<u64>, offset: Option<u64>) -> Self {
        Self {
            limit: limit
                .unwrap_or(DEFAULT_PAGE_LIMIT)
                .clamp(1, MAX_PAGE_LIMIT),
            offset: offset.unwrap_or(0),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_LIMIT, 0)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "limit={} offset={}", self.limit, self.offset)
    }
}
