//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::Location;

/// Query for the index page.
///
/// The search button submits the whole form here, so date and time come
/// along and are kept.
#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    pub from_address: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    /// Id of a candidate clicked in the list
    pub pick: Option<String>,
}

/// Request to search stops.
#[derive(Debug, Deserialize)]
pub struct StopSearchRequest {
    /// Free-text address
    #[serde(default)]
    pub q: String,
}

/// A candidate stop in search results.
#[derive(Debug, Serialize)]
pub struct StopResult {
    /// Global stop id (e.g., "de:05913:284")
    pub id: String,

    /// Display name
    pub name: String,

    /// `[lat, lon]`, when known
    pub coord: Option<[f64; 2]>,

    /// Whether the stop finder marked this as its preferred match
    pub is_best: bool,
}

impl From<&Location> for StopResult {
    fn from(location: &Location) -> Self {
        Self {
            id: location.id.clone(),
            name: location.name.clone(),
            coord: location.coord,
            is_best: location.is_best,
        }
    }
}

/// Response for stop search.
#[derive(Debug, Serialize)]
pub struct StopSearchResponse {
    pub stops: Vec<StopResult>,

    /// Id of the stop that would be picked automatically
    pub best: Option<String>,
}

/// The trip form as posted by the go button.
#[derive(Debug, Default, Deserialize)]
pub struct NavigateForm {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub from_address: String,
    /// Id of the candidate picked from the list, if any
    #[serde(default)]
    pub selected_id: Option<String>,
    /// The address shown when the candidate was picked
    #[serde(default)]
    pub selected_name: Option<String>,
}

impl NavigateForm {
    /// The picked candidate, unless the address was edited after picking.
    pub fn selection(&self) -> Option<Location> {
        let id = self.selected_id.as_deref().filter(|id| !id.is_empty())?;
        let name = self.selected_name.as_deref()?;
        (name == self.from_address).then(|| Location::new(id, name))
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
