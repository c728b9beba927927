//! The stop lookup seam.

use std::future::Future;

use crate::domain::Location;

use super::error::LookupError;

/// Something that can resolve a free-text address to candidate stops.
///
/// Implemented by the live [`StopFinderClient`](super::StopFinderClient),
/// the [`MockStopFinder`](super::MockStopFinder) and the
/// [`CachedStopFinder`](crate::cache::CachedStopFinder) wrapper. An empty
/// result is not an error.
pub trait StopLookup: Send + Sync {
    fn lookup(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<Vec<Location>, LookupError>> + Send;
}

impl<L: StopLookup> StopLookup for std::sync::Arc<L> {
    fn lookup(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<Vec<Location>, LookupError>> + Send {
        (**self).lookup(address)
    }
}
