//! EFA stop finder client.

use std::time::Duration;

use tracing::debug;

use crate::domain::Location;

use super::error::LookupError;
use super::lookup::StopLookup;
use super::types::StopFinderResponse;

/// Default stop finder endpoint (Westfalentarif EFA).
pub const DEFAULT_BASE_URL: &str = "https://www.westfalenfahrplan.de/nwl-efa/XML_STOPFINDER_REQUEST";

/// Build the stop finder URL for an address.
///
/// The address is interpolated as typed. Parameters are emitted in the
/// order the EFA web client uses.
pub fn stop_finder_url(base_url: &str, address: &str) -> String {
    format!(
        "{base_url}?coordOutputFormat=WGS84%5Bdd.ddddd%5D\
         &language=de\
         &locationInfoActive=1\
         &locationServerActive=1\
         &name_sf={address}\
         &nwlStopFinderMacro=1\
         &outputFormat=rapidJSON\
         &serverInfo=1\
         &sl3plusStopFinderMacro=1\
         &type_sf=any\
         &version=10.4.18.18"
    )
}

/// Configuration for the stop finder client.
#[derive(Debug, Clone)]
pub struct StopFinderConfig {
    /// Stop finder endpoint, without query string
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl StopFinderConfig {
    /// Create a config for the default endpoint.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing or another EFA instance).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a custom request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for StopFinderConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP client for the EFA stop finder.
#[derive(Debug, Clone)]
pub struct StopFinderClient {
    http: reqwest::Client,
    base_url: String,
}

impl StopFinderClient {
    /// Create a new stop finder client.
    pub fn new(config: StopFinderConfig) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// The URL that a lookup for `address` will request.
    pub fn url_for(&self, address: &str) -> String {
        stop_finder_url(&self.base_url, address)
    }

    /// Fetch candidate locations for an address.
    pub async fn fetch(&self, address: &str) -> Result<Vec<Location>, LookupError> {
        let url = self.url_for(address);
        debug!(%url, "stop finder request");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let response: StopFinderResponse =
            serde_json::from_str(&body).map_err(|e| LookupError::Json {
                message: e.to_string(),
            })?;

        Ok(response.into_locations())
    }
}

impl StopLookup for StopFinderClient {
    async fn lookup(&self, address: &str) -> Result<Vec<Location>, LookupError> {
        self.fetch(address).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = StopFinderConfig::new();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_builders() {
        let config = StopFinderConfig::new()
            .with_base_url("http://localhost:8080/stopfinder")
            .with_timeout_secs(5);
        assert_eq!(config.base_url, "http://localhost:8080/stopfinder");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn url_has_fixed_parameters_in_order() {
        let url = stop_finder_url("https://efa.example/XML_STOPFINDER_REQUEST", "Hauptbahnhof");
        assert_eq!(
            url,
            "https://efa.example/XML_STOPFINDER_REQUEST?coordOutputFormat=WGS84%5Bdd.ddddd%5D\
             &language=de&locationInfoActive=1&locationServerActive=1&name_sf=Hauptbahnhof\
             &nwlStopFinderMacro=1&outputFormat=rapidJSON&serverInfo=1\
             &sl3plusStopFinderMacro=1&type_sf=any&version=10.4.18.18"
        );
    }

    #[test]
    fn address_is_interpolated_raw() {
        let url = stop_finder_url(DEFAULT_BASE_URL, "Mergelteichstraße 80, 44225 Dortmund");
        assert!(url.contains("&name_sf=Mergelteichstraße 80, 44225 Dortmund&"));
    }

    #[test]
    fn client_uses_configured_base_url() {
        let client =
            StopFinderClient::new(StopFinderConfig::new().with_base_url("http://localhost:1/sf"))
                .unwrap();
        assert!(client.url_for("x").starts_with("http://localhost:1/sf?"));
    }
}
