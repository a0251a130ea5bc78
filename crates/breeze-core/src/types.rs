//! Core types for breeze-core.
//!
//! This module defines the data structures shared across all layers: the
//! geocoded [`Location`] and the [`LookupStatus`] of the most recent lookup.

use serde::{Deserialize, Serialize};

/// A geocoding result, immutable once received from the lookup service.
///
/// The field names mirror the OpenWeatherMap direct-geocoding response, so
/// the wire payload deserializes straight into this type. Unknown wire
/// fields (`local_names`, …) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// City name as returned by the geocoder.
    pub name: String,
    /// Administrative region (state, province, …), when the geocoder knows one.
    #[serde(default)]
    pub state: Option<String>,
    /// ISO 3166 country code.
    pub country: String,
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lon: f64,
}

impl Location {
    /// The navigation target consumed by the weather view:
    /// `/weather?lat=<lat>&lon=<lon>`.
    ///
    /// The route itself is owned by an external component; breeze only
    /// builds and displays it.
    pub fn weather_route(&self) -> String {
        format!("/weather?lat={}&lon={}", self.lat, self.lon)
    }

    /// Subtitle line for list rows: `state country`, with the state omitted
    /// when absent.
    pub fn region(&self) -> String {
        match self.state.as_deref() {
            Some(state) => format!("{state} {}", self.country),
            None => self.country.clone(),
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.name, self.region())
    }
}

/// Progress of the most recent geocoding lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupStatus {
    /// No lookup outstanding and none completed since the last reset.
    #[default]
    Idle,
    /// A lookup for the current query is in flight.
    Pending,
    /// The last lookup completed and its results are current.
    Success,
    /// The last lookup failed; prior results are left untouched.
    Error,
}

impl std::fmt::Display for LookupStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupStatus::Idle => write!(f, "idle"),
            LookupStatus::Pending => write!(f, "pending"),
            LookupStatus::Success => write!(f, "success"),
            LookupStatus::Error => write!(f, "error"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
