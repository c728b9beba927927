//! Runtime configuration for the server binary.
//!
//! Read from `TRIP_LINK_*` environment variables; every setting has a
//! default so the server runs without any.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::controller::{DEFAULT_DEBOUNCE, SubmitMode};
use crate::deeplink::DEFAULT_PLANNER_URL;
use crate::domain::DEFAULT_DESTINATION_ADDRESS;
use crate::efa::DEFAULT_BASE_URL;

/// Errors from reading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address to listen on (`TRIP_LINK_ADDR`)
    pub addr: SocketAddr,
    /// Fixed trip destination (`TRIP_LINK_DESTINATION`)
    pub destination: String,
    /// Stop finder endpoint (`TRIP_LINK_STOP_FINDER_URL`)
    pub stop_finder_url: String,
    /// Journey planner trip page (`TRIP_LINK_PLANNER_URL`)
    pub planner_url: String,
    /// Serve stop lookups from this directory instead of the network
    /// (`TRIP_LINK_MOCK_DATA`)
    pub mock_data: Option<PathBuf>,
    /// Search debounce (`TRIP_LINK_DEBOUNCE_MS`)
    pub debounce: Duration,
    /// `selection` or `lookup` (`TRIP_LINK_SUBMIT_MODE`)
    pub submit_mode: SubmitMode,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            destination: DEFAULT_DESTINATION_ADDRESS.to_string(),
            stop_finder_url: DEFAULT_BASE_URL.to_string(),
            planner_url: DEFAULT_PLANNER_URL.to_string(),
            mock_data: None,
            debounce: DEFAULT_DEBOUNCE,
            submit_mode: SubmitMode::Selection,
        }
    }
}

impl AppConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Read the configuration through a variable lookup function.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let get = |name: &str| var(name).filter(|v| !v.trim().is_empty());

        if let Some(addr) = get("TRIP_LINK_ADDR") {
            config.addr = addr.trim().parse().map_err(|e| ConfigError::Invalid {
                var: "TRIP_LINK_ADDR",
                message: format!("{addr:?}: {e}"),
            })?;
        }

        if let Some(destination) = get("TRIP_LINK_DESTINATION") {
            config.destination = destination;
        }

        if let Some(url) = get("TRIP_LINK_STOP_FINDER_URL") {
            config.stop_finder_url = url;
        }

        if let Some(url) = get("TRIP_LINK_PLANNER_URL") {
            config.planner_url = url;
        }

        config.mock_data = get("TRIP_LINK_MOCK_DATA").map(PathBuf::from);

        if let Some(ms) = get("TRIP_LINK_DEBOUNCE_MS") {
            let ms: u64 = ms.trim().parse().map_err(|e| ConfigError::Invalid {
                var: "TRIP_LINK_DEBOUNCE_MS",
                message: format!("{ms:?}: {e}"),
            })?;
            config.debounce = Duration::from_millis(ms);
        }

        if let Some(mode) = get("TRIP_LINK_SUBMIT_MODE") {
            config.submit_mode = match mode.trim() {
                "selection" => SubmitMode::Selection,
                "lookup" => SubmitMode::LookupOnSubmit,
                other => {
                    return Err(ConfigError::Invalid {
                        var: "TRIP_LINK_SUBMIT_MODE",
                        message: format!("{other:?}: expected \"selection\" or \"lookup\""),
                    });
                }
            };
        }

        Ok(config)
    }
}
