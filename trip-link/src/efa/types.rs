//! Wire types for the EFA stop finder (`outputFormat=rapidJSON`).
//!
//! Only the fields we display or select on are modelled. Everything is
//! optional on the wire; the conversion into [`Location`] decides what a
//! usable candidate is.

use serde::{Deserialize, Serialize};

use crate::domain::Location;

/// Top-level stop finder response.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StopFinderResponse {
    /// Candidate locations. Absent when nothing matched.
    #[serde(default)]
    pub locations: Option<Vec<LocationDto>>,
}

impl StopFinderResponse {
    /// Convert the response into domain locations, keeping API order.
    ///
    /// Entries without an identifier cannot be navigated to and are dropped.
    pub fn into_locations(self) -> Vec<Location> {
        self.locations
            .unwrap_or_default()
            .into_iter()
            .filter_map(LocationDto::into_location)
            .collect()
    }
}

/// A single candidate as returned by the stop finder.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDto {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// `[lat, lon]` in WGS84 decimal degrees.
    #[serde(default)]
    pub coord: Option<Vec<f64>>,
    #[serde(default)]
    pub is_best: bool,
    #[serde(rename = "type", default)]
    pub location_type: Option<String>,
    #[serde(default)]
    pub match_quality: Option<i64>,
}

impl LocationDto {
    /// Convert to a domain location. Returns `None` without an id.
    pub fn into_location(self) -> Option<Location> {
        let id = self.id.filter(|id| !id.is_empty())?;
        let coord = match self.coord.as_deref() {
            Some([a, b, ..]) => Some([*a, *b]),
            _ => None,
        };

        Some(Location {
            name: self.name.unwrap_or_else(|| id.clone()),
            id,
            coord,
            is_best: self.is_best,
        })
    }
}
