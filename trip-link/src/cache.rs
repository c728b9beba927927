//! Caching layer for stop lookups.
//!
//! Search-as-you-type tends to repeat the same address (backspace, retype,
//! the destination on every page load). Successful lookups are cached for a
//! short TTL keyed by the trimmed address; failures are never cached.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::Location;
use crate::efa::{LookupError, StopLookup};

/// Cached lookup result.
type LookupEntry = Arc<Vec<Location>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 500,
        }
    }
}

/// Stop lookup with caching.
///
/// Wraps any [`StopLookup`] and caches its successful responses.
pub struct CachedStopFinder<L> {
    inner: L,
    cache: MokaCache<String, LookupEntry>,
}

impl<L: StopLookup> CachedStopFinder<L> {
    /// Create a new cached lookup.
    pub fn new(inner: L, config: &CacheConfig) -> Self {
        let cache = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, cache }
    }

    /// Access the underlying lookup for requests that bypass the cache.
    pub fn inner(&self) -> &L {
        &self.inner
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
    }
}

impl<L: StopLookup> StopLookup for CachedStopFinder<L> {
    async fn lookup(&self, address: &str) -> Result<Vec<Location>, LookupError> {
        let key = address.trim().to_string();

        // Try cache first
        if let Some(cached) = self.cache.get(&key).await {
            trace!(address, "stop lookup cache hit");
            return Ok(cached.as_ref().clone());
        }

        let locations = self.inner.lookup(address).await?;

        self.cache
            .insert(key, Arc::new(locations.clone()))
            .await;

        Ok(locations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::efa::MockStopFinder;

    fn hbf() -> Vec<Location> {
        vec![Location::new("de:05913:284", "Dortmund, Hauptbahnhof").best()]
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(60));
        assert_eq!(config.max_capacity, 500);
    }

    #[tokio::test]
    async fn repeated_lookup_hits_cache() {
        let mock = MockStopFinder::new().with_locations("Hauptbahnhof", hbf());
        let cached = CachedStopFinder::new(mock.clone(), &CacheConfig::default());

        assert_eq!(cached.lookup("Hauptbahnhof").await.unwrap(), hbf());
        assert_eq!(cached.lookup("Hauptbahnhof ").await.unwrap(), hbf());

        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let mock = MockStopFinder::new().with_failure("kaputt", 500);
        let cached = CachedStopFinder::new(mock.clone(), &CacheConfig::default());

        assert!(cached.lookup("kaputt").await.is_err());
        assert!(cached.lookup("kaputt").await.is_err());

        assert_eq!(mock.request_count(), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let mock = MockStopFinder::new().with_locations("Hauptbahnhof", hbf());
        let cached = CachedStopFinder::new(mock.clone(), &CacheConfig::default());

        cached.lookup("Hauptbahnhof").await.unwrap();
        cached.invalidate_cache();
        cached.lookup("Hauptbahnhof").await.unwrap();

        assert_eq!(mock.request_count(), 2);
    }
}
