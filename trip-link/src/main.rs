use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trip_link::cache::{CacheConfig, CachedStopFinder};
use trip_link::config::AppConfig;
use trip_link::controller::ControllerConfig;
use trip_link::deeplink::{DeepLinkBuilder, DeepLinkConfig};
use trip_link::domain::DestinationContext;
use trip_link::efa::{MockStopFinder, StopFinderClient, StopFinderConfig};
use trip_link::web::{AppState, StopSource, create_router};

/// Static assets shipped with the crate.
const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// How often to retry resolving the destination after a failed startup lookup.
const DESTINATION_RETRY_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .init();

    let config = AppConfig::from_env()?;

    // Canned responses when a data directory is given, the live stop finder otherwise
    let source = match &config.mock_data {
        Some(dir) => {
            let mock = MockStopFinder::from_dir(dir)?;
            info!(dir = %dir.display(), addresses = mock.addresses().len(), "using mock stop finder");
            StopSource::Mock(mock)
        }
        None => {
            let client_config = StopFinderConfig::new().with_base_url(&config.stop_finder_url);
            StopSource::Live(StopFinderClient::new(client_config)?)
        }
    };

    let stops = CachedStopFinder::new(source, &CacheConfig::default());
    let destination = Arc::new(DestinationContext::new(&config.destination));
    let links = DeepLinkBuilder::new(DeepLinkConfig::new().with_base_url(&config.planner_url));
    let controller = ControllerConfig::new(config.debounce, config.submit_mode);

    let state = AppState::new(stops, destination, links, controller);

    // Resolve the destination before serving; on failure links use the
    // fallback until a background retry succeeds
    if state.resolve_destination().await.is_none() {
        warn!(
            address = %config.destination,
            fallback = %state.destination.id_or_fallback(),
            "destination unresolved, deep links use the fallback stop"
        );

        let retry_state = state.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(DESTINATION_RETRY_INTERVAL);
            interval.tick().await; // First tick is immediate, skip it
            loop {
                interval.tick().await;
                if retry_state.resolve_destination().await.is_some() {
                    break;
                }
            }
        });
    }

    let app = create_router(state, STATIC_DIR);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, "trip planner listening on http://{}", config.addr);
    info!("  GET  /                  - Trip form");
    info!("  GET  /api/stops/search  - Stop search");
    info!("  POST /navigate          - Open the journey planner");
    info!("  GET  /health            - Health check");

    axum::serve(listener, app).await?;
    Ok(())
}
