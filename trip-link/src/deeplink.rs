//! Journey planner deep links.
//!
//! The planner web app restores its trip form from a single `formik` query
//! parameter. That parameter is itself a query string whose values are
//! percent-encoded, so every value ends up encoded twice in the final URL.

use crate::domain::{FALLBACK_DESTINATION_ID, InputError, TripDate, TripTime};

/// Default journey planner trip page.
pub const DEFAULT_PLANNER_URL: &str = "https://www.westfalenfahrplan.de/nwlsl3+/trip";

/// Format an ISO "YYYY-MM-DD" date as the planner's `DDMMYYYY`.
///
/// ```
/// use trip_link::deeplink::format_date_for_link;
///
/// assert_eq!(format_date_for_link("2024-03-05").unwrap(), "05032024");
/// assert!(format_date_for_link("yesterday").is_err());
/// ```
pub fn format_date_for_link(iso_date: &str) -> Result<String, InputError> {
    TripDate::parse(iso_date).map(|d| d.to_ddmmyyyy())
}

/// Format an "HH:MM" time as the planner's `HHMM`.
pub fn format_time_for_link(time: &str) -> Result<String, InputError> {
    TripTime::parse(time).map(|t| t.to_hhmm())
}

/// Configuration for deep link generation.
#[derive(Debug, Clone)]
pub struct DeepLinkConfig {
    /// Trip page of the journey planner
    pub base_url: String,
    /// Destination used when none has been resolved
    pub fallback_destination: String,
}

impl DeepLinkConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_PLANNER_URL.to_string(),
            fallback_destination: FALLBACK_DESTINATION_ID.to_string(),
        }
    }

    /// Set a custom trip page URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl Default for DeepLinkConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds deep links into the journey planner.
#[derive(Debug, Clone, Default)]
pub struct DeepLinkBuilder {
    config: DeepLinkConfig,
}

impl DeepLinkBuilder {
    pub fn new(config: DeepLinkConfig) -> Self {
        Self { config }
    }

    /// Build a deep link.
    ///
    /// `date` is `DDMMYYYY` and `time` is `HHMM`. An empty `dest_id` is
    /// replaced by the configured fallback destination.
    pub fn build(&self, origin_id: &str, date: &str, time: &str, dest_id: &str) -> String {
        let destination = if dest_id.is_empty() {
            self.config.fallback_destination.as_str()
        } else {
            dest_id
        };

        let params = [
            ("destination", destination),
            ("itdDateDayMonthYear", date),
            ("itdTime", time),
            ("origin", origin_id),
        ];

        let formik = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        format!(
            "{}?formik={}&lng=de&sharedLink=true",
            self.config.base_url,
            urlencoding::encode(&formik)
        )
    }

    /// Build a deep link from parsed form inputs.
    pub fn build_for(
        &self,
        origin_id: &str,
        date: TripDate,
        time: TripTime,
        dest_id: &str,
    ) -> String {
        self.build(origin_id, &date.to_ddmmyyyy(), &time.to_hhmm(), dest_id)
    }
}

/// Build a deep link with the default planner URL and fallback destination.
pub fn build_deep_link(origin_id: &str, date: &str, time: &str, dest_id: &str) -> String {
    DeepLinkBuilder::default().build(origin_id, date, time, dest_id)
}
