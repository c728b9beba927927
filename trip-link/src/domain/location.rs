//! Candidate stops and best-stop selection.

use std::fmt;

use serde::Serialize;

/// A stop candidate returned by the stop finder.
///
/// Scoped to a single search response and superseded by the next one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    /// Display name, e.g. "Dortmund, Hauptbahnhof"
    pub name: String,
    /// Global stop identifier, e.g. "de:05913:284"
    pub id: String,
    /// `[lat, lon]` in WGS84 decimal degrees
    pub coord: Option<[f64; 2]>,
    /// Whether the stop finder marked this as its preferred match
    pub is_best: bool,
}

impl Location {
    /// Create a location without coordinates.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            coord: None,
            is_best: false,
        }
    }

    /// Set the coordinates.
    pub fn with_coord(mut self, lat: f64, lon: f64) -> Self {
        self.coord = Some([lat, lon]);
        self
    }

    /// Mark as the stop finder's preferred match.
    pub fn best(mut self) -> Self {
        self.is_best = true;
        self
    }
}

/// Renders as `name - (lat, lon)`, or just the name without coordinates.
impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.coord {
            Some([lat, lon]) => write!(f, "{} - ({}, {})", self.name, lat, lon),
            None => f.write_str(&self.name),
        }
    }
}

/// Pick the location to navigate to.
///
/// Returns the first location flagged `is_best`, otherwise the first
/// location in API order. Returns `None` for an empty list.
pub fn select_best(locations: &[Location]) -> Option<&Location> {
    locations
        .iter()
        .find(|loc| loc.is_best)
        .or_else(|| locations.first())
}
