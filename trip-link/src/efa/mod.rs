//! EFA stop finder client.
//!
//! Resolves free-text addresses to candidate stops through the EFA
//! `XML_STOPFINDER_REQUEST` endpoint (`outputFormat=rapidJSON`).
//!
//! Key characteristics of the stop finder:
//! - Results come back in relevance order; at most one is flagged `isBest`
//! - Stop identifiers are global IDs such as `de:05913:284`
//! - An address with no match yields a response without `locations`

mod client;
mod error;
mod lookup;
mod mock;
mod types;

pub use client::{DEFAULT_BASE_URL, StopFinderClient, StopFinderConfig, stop_finder_url};
pub use error::LookupError;
pub use lookup::StopLookup;
pub use mock::MockStopFinder;
pub use types::{LocationDto, StopFinderResponse};
