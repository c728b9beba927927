//! Mock stop finder for development and tests.
//!
//! Serves canned responses keyed by address, either registered in code or
//! loaded from a directory of `{address}.json` files holding raw stop finder
//! responses. Every lookup is recorded so tests can count requests.

use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::domain::Location;

use super::error::LookupError;
use super::lookup::StopLookup;
use super::types::StopFinderResponse;

/// Most recent lookups kept for inspection.
const RECORDED_REQUESTS: usize = 256;

#[derive(Debug, Clone)]
struct MockEntry {
    /// Locations to return, or the HTTP status to fail with.
    result: Result<Vec<Location>, u16>,
    delay: Duration,
}

#[derive(Debug, Default)]
struct MockState {
    entries: HashMap<String, MockEntry>,
    requests: VecDeque<String>,
    request_count: usize,
}

/// Mock stop finder that never touches the network.
///
/// Addresses without a registered response resolve to an empty list.
#[derive(Debug, Clone, Default)]
pub struct MockStopFinder {
    state: Arc<Mutex<MockState>>,
}

impl MockStopFinder {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load responses from a directory.
    ///
    /// Each `*.json` file is parsed as a stop finder response and served for
    /// the address equal to the file stem.
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Result<Self, LookupError> {
        let data_dir = data_dir.as_ref();
        let mock = Self::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| LookupError::Mock {
            message: format!("failed to read mock data directory {:?}: {}", data_dir, e),
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| LookupError::Mock {
                message: format!("failed to read directory entry: {}", e),
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let Some(address) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let json = std::fs::read_to_string(&path).map_err(|e| LookupError::Mock {
                message: format!("failed to read {:?}: {}", path, e),
            })?;

            let response: StopFinderResponse =
                serde_json::from_str(&json).map_err(|e| LookupError::Json {
                    message: format!("{:?}: {}", path, e),
                })?;

            mock.insert(address, Ok(response.into_locations()));
        }

        Ok(mock)
    }

    /// Serve `locations` for `address`.
    pub fn with_locations(self, address: &str, locations: Vec<Location>) -> Self {
        self.insert(address, Ok(locations));
        self
    }

    /// Fail lookups for `address` with the given HTTP status.
    pub fn with_failure(self, address: &str, status: u16) -> Self {
        self.insert(address, Err(status));
        self
    }

    /// Delay the response for `address` (registering an empty one if needed).
    pub fn with_delay(self, address: &str, delay: Duration) -> Self {
        {
            let mut state = self.lock();
            state
                .entries
                .entry(address.trim().to_string())
                .or_insert_with(|| MockEntry {
                    result: Ok(Vec::new()),
                    delay: Duration::ZERO,
                })
                .delay = delay;
        }
        self
    }

    /// The most recent addresses looked up, oldest first.
    pub fn requests(&self) -> Vec<String> {
        self.lock().requests.iter().cloned().collect()
    }

    /// Number of lookups performed so far.
    pub fn request_count(&self) -> usize {
        self.lock().request_count
    }

    /// Addresses with a registered response.
    pub fn addresses(&self) -> Vec<String> {
        let mut addresses: Vec<_> = self.lock().entries.keys().cloned().collect();
        addresses.sort();
        addresses
    }

    fn insert(&self, address: &str, result: Result<Vec<Location>, u16>) {
        let mut state = self.lock();
        let delay = state
            .entries
            .get(address.trim())
            .map(|e| e.delay)
            .unwrap_or_default();
        state
            .entries
            .insert(address.trim().to_string(), MockEntry { result, delay });
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        // Poisoned only by a panicking test
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl StopLookup for MockStopFinder {
    async fn lookup(&self, address: &str) -> Result<Vec<Location>, LookupError> {
        let entry = {
            let mut state = self.lock();
            if state.requests.len() == RECORDED_REQUESTS {
                state.requests.pop_front();
            }
            state.requests.push_back(address.to_string());
            state.request_count += 1;
            state.entries.get(address.trim()).cloned()
        };

        let Some(entry) = entry else {
            return Ok(Vec::new());
        };

        if !entry.delay.is_zero() {
            tokio::time::sleep(entry.delay).await;
        }

        entry.result.map_err(|status| LookupError::Api {
            status,
            message: format!("mock failure for {:?}", address),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn location(id: &str, name: &str, is_best: bool) -> Location {
        Location {
            name: name.to_string(),
            id: id.to_string(),
            coord: Some([51.5, 7.4]),
            is_best,
        }
    }

    #[tokio::test]
    async fn serves_registered_locations() {
        let mock = MockStopFinder::new()
            .with_locations("Hauptbahnhof", vec![location("A", "Dortmund Hbf", true)]);

        let found = mock.lookup("Hauptbahnhof").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "A");
        assert_eq!(mock.requests(), vec!["Hauptbahnhof".to_string()]);
    }

    #[tokio::test]
    async fn unknown_address_is_empty() {
        let mock = MockStopFinder::new();
        assert!(mock.lookup("nowhere").await.unwrap().is_empty());
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn scripted_failure() {
        let mock = MockStopFinder::new().with_failure("broken", 502);
        let err = mock.lookup("broken").await.unwrap_err();
        assert!(matches!(err, LookupError::Api { status: 502, .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn delay_survives_later_registration() {
        let mock = MockStopFinder::new()
            .with_delay("slow", Duration::from_secs(2))
            .with_locations("slow", vec![location("S", "Slow", false)]);

        let start = tokio::time::Instant::now();
        let found = mock.lookup("slow").await.unwrap();
        assert_eq!(found[0].id, "S");
        assert!(start.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test]
    async fn loads_directory() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("Hauptbahnhof.json"),
            r#"{"locations":[{"id":"de:05913:13","name":"Dortmund Hbf","coord":[51.5,7.4],"isBest":true}]}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let mock = MockStopFinder::from_dir(dir.path()).unwrap();
        assert_eq!(mock.addresses(), vec!["Hauptbahnhof".to_string()]);

        let found = mock.lookup("Hauptbahnhof").await.unwrap();
        assert_eq!(found[0].id, "de:05913:13");
        assert!(found[0].is_best);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let result = MockStopFinder::from_dir("/nonexistent/mock/stops");
        assert!(matches!(result, Err(LookupError::Mock { .. })));
    }

    #[test]
    fn invalid_json_is_an_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("bad.json"), "{not json").unwrap();

        let result = MockStopFinder::from_dir(dir.path());
        assert!(matches!(result, Err(LookupError::Json { .. })));
    }

    #[tokio::test]
    async fn request_log_keeps_most_recent() {
        let mock = MockStopFinder::new();
        for i in 0..RECORDED_REQUESTS + 10 {
            mock.lookup(&format!("Adresse {i}")).await.unwrap();
        }

        let requests = mock.requests();
        assert_eq!(mock.request_count(), RECORDED_REQUESTS + 10);
        assert_eq!(requests.len(), RECORDED_REQUESTS);
        assert_eq!(requests[0], "Adresse 10");
        assert_eq!(
            requests.last().map(String::as_str),
            Some(format!("Adresse {}", RECORDED_REQUESTS + 9).as_str())
        );
    }
}
