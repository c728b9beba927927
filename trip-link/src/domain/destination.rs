//! The fixed trip destination.

use std::sync::OnceLock;

use super::location::Location;

/// Default destination address.
pub const DEFAULT_DESTINATION_ADDRESS: &str = "Mergelteichstraße 80, 44225 Dortmund";

/// Stop used for deep links until the destination has been resolved.
pub const FALLBACK_DESTINATION_ID: &str = "de:05978:11186";

/// The destination every trip is planned to.
///
/// The address is fixed at construction. The resolved stop is written at
/// most once, by the initial lookup, and read by every page and deep link
/// after that.
/// Until then readers get `None` and links use [`FALLBACK_DESTINATION_ID`].
///
/// Share it behind an `Arc`.
#[derive(Debug)]
pub struct DestinationContext {
    address: String,
    resolved: OnceLock<Location>,
}

impl DestinationContext {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            resolved: OnceLock::new(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Record the resolved stop.
    ///
    /// Returns `false` if a stop was already recorded; the first one wins.
    pub fn resolve(&self, stop: Location) -> bool {
        self.resolved.set(stop).is_ok()
    }

    /// The resolved stop, if the initial lookup has completed.
    pub fn stop(&self) -> Option<&Location> {
        self.resolved.get()
    }

    /// The resolved identifier, if the initial lookup has completed.
    pub fn destination_id(&self) -> Option<&str> {
        self.stop().map(|stop| stop.id.as_str())
    }

    /// The identifier to put in a deep link.
    pub fn id_or_fallback(&self) -> &str {
        self.destination_id().unwrap_or(FALLBACK_DESTINATION_ID)
    }
}

impl Default for DestinationContext {
    fn default() -> Self {
        Self::new(DEFAULT_DESTINATION_ADDRESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_uses_fallback() {
        let ctx = DestinationContext::default();
        assert_eq!(ctx.address(), DEFAULT_DESTINATION_ADDRESS);
        assert_eq!(ctx.destination_id(), None);
        assert!(ctx.stop().is_none());
        assert_eq!(ctx.id_or_fallback(), FALLBACK_DESTINATION_ID);
    }

    #[test]
    fn first_resolution_wins() {
        let ctx = DestinationContext::new("Somewhere 1");
        assert!(ctx.resolve(Location::new("de:05913:1", "Erste")));
        assert!(!ctx.resolve(Location::new("de:05913:2", "Zweite")));
        assert_eq!(ctx.destination_id(), Some("de:05913:1"));
        assert_eq!(ctx.stop().map(|s| s.name.as_str()), Some("Erste"));
        assert_eq!(ctx.id_or_fallback(), "de:05913:1");
    }
}
