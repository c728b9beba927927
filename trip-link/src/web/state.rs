//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedStopFinder;
use crate::controller::{ControllerConfig, NavigationController, RecordingSurface};
use crate::deeplink::DeepLinkBuilder;
use crate::domain::{DestinationContext, Location};
use crate::efa::{LookupError, MockStopFinder, StopFinderClient, StopLookup};

/// Where stop lookups are served from.
#[derive(Debug, Clone)]
pub enum StopSource {
    /// The live EFA stop finder
    Live(StopFinderClient),
    /// Canned responses (development without network)
    Mock(MockStopFinder),
}

impl StopLookup for StopSource {
    async fn lookup(&self, address: &str) -> Result<Vec<Location>, LookupError> {
        match self {
            StopSource::Live(client) => client.lookup(address).await,
            StopSource::Mock(mock) => mock.lookup(address).await,
        }
    }
}

/// Stop lookup shared by all requests.
pub type SharedStops = Arc<CachedStopFinder<StopSource>>;

/// A controller for a single request, rendering into a recording.
pub type PageController = NavigationController<SharedStops, RecordingSurface>;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Cached stop lookup
    pub stops: SharedStops,

    /// The fixed destination and its resolved stop
    pub destination: Arc<DestinationContext>,

    /// Deep link generation
    pub links: Arc<DeepLinkBuilder>,

    /// Controller settings for each page
    pub controller: Arc<ControllerConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        stops: CachedStopFinder<StopSource>,
        destination: Arc<DestinationContext>,
        links: DeepLinkBuilder,
        controller: ControllerConfig,
    ) -> Self {
        Self {
            stops: Arc::new(stops),
            destination,
            links: Arc::new(links),
            controller: Arc::new(controller),
        }
    }

    /// Look the destination up unless it is already resolved.
    ///
    /// Pages only show what this stored; they never look it up themselves.
    pub async fn resolve_destination(&self) -> Option<Location> {
        self.page_controller().load().await
    }

    /// A fresh controller for one request.
    pub fn page_controller(&self) -> PageController {
        NavigationController::new(
            Arc::clone(&self.stops),
            RecordingSurface::new(),
            Arc::clone(&self.destination),
            (*self.links).clone(),
            (*self.controller).clone(),
        )
    }
}
