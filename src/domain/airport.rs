//! Airport codes accepted by the trip provider.
//!
//! Codes are matched case-insensitively. Callers normalize with
//! [`AirportCode::parse`] before building cache keys so that `"atl"` and
//! `"ATL"` share one cache entry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use thiserror::Error;

/// IATA codes the upstream provider can route between.
pub const SUPPORTED_AIRPORTS: &[&str] = &[
    "ATL", "PEK", "LAX", "DXB", "HND", "ORD", "LHR", "PVG", "CDG", "DFW", "CGK", "DEN", "FRA",
    "IST", "AMS", "CAN", "SIN", "JFK", "ICN", "BKK", "SFO", "LAS", "CLT", "MIA", "KUL", "SEA",
    "MUC", "EWR", "MAD", "HKG", "MCO", "PHX", "IAH", "SYD", "MEL", "GRU", "YYZ", "LGW", "BCN",
    "MAN", "BOM", "DEL", "ZRH", "PHL", "FCO", "DOH", "NRT", "MEX", "BOS", "MSP",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported airport: {0}")]
pub struct UnsupportedAirport(pub String);

/// Returns true when `code` is on the allow-list, ignoring ASCII case.
#[must_use]
pub fn is_supported_airport(code: &str) -> bool {
    SUPPORTED_AIRPORTS
        .iter()
        .any(|supported| supported.eq_ignore_ascii_case(code))
}

/// A validated, uppercase airport code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AirportCode(String);

impl AirportCode {
    /// Normalizes `raw` (trim + uppercase) and checks it against the allow-list.
    pub fn parse(raw: &str) -> Result<Self, UnsupportedAirport> {
        let normalized = raw.trim().to_ascii_uppercase();
        if is_supported_airport(&normalized) {
            Ok(Self(normalized))
        } else {
            Err(UnsupportedAirport(raw.to_string()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for AirportCode {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for AirportCode {
    type Error = UnsupportedAirport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AirportCode> for String {
    fn from(code: AirportCode) -> Self {
        code.0
    }
}
