//! Parsed date and time form inputs.
//!
//! The form delivers dates as ISO "YYYY-MM-DD" and times as "HH:MM". These
//! types are only constructed from input that passed the same checks the
//! validator applies, so link formatting cannot fail on them.

use std::fmt;

use chrono::{Datelike, NaiveDate};

/// Error returned when a date or time input cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field}: {reason}")]
pub struct InputError {
    field: &'static str,
    reason: &'static str,
}

impl InputError {
    fn date(reason: &'static str) -> Self {
        Self {
            field: "date",
            reason,
        }
    }

    fn time(reason: &'static str) -> Self {
        Self {
            field: "time",
            reason,
        }
    }
}

/// A calendar date entered as "YYYY-MM-DD".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TripDate(NaiveDate);

impl TripDate {
    /// Parse an ISO calendar date. Surrounding whitespace is ignored.
    pub fn parse(s: &str) -> Result<Self, InputError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(InputError::date("empty"));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| InputError::date("expected YYYY-MM-DD"))
    }

    /// The underlying chrono date.
    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// Render as `DDMMYYYY`.
    pub fn to_ddmmyyyy(&self) -> String {
        format!("{:02}{:02}{:04}", self.0.day(), self.0.month(), self.0.year())
    }
}

impl From<NaiveDate> for TripDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for TripDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// A time of day entered as "HH:MM".
///
/// The hour may be one or two digits (0-23); the minute is always two
/// digits (00-59).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TripTime {
    hour: u8,
    minute: u8,
}

impl TripTime {
    /// Create a time from components.
    pub fn new(hour: u8, minute: u8) -> Result<Self, InputError> {
        if hour > 23 {
            return Err(InputError::time("hour must be 0-23"));
        }
        if minute > 59 {
            return Err(InputError::time("minute must be 0-59"));
        }
        Ok(Self { hour, minute })
    }

    /// Parse "H:MM" or "HH:MM". No surrounding whitespace is accepted.
    pub fn parse(s: &str) -> Result<Self, InputError> {
        let (h, m) = s
            .split_once(':')
            .ok_or(InputError::time("expected HH:MM"))?;

        if h.is_empty() || h.len() > 2 || !h.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InputError::time("hour must be one or two digits"));
        }
        if m.len() != 2 || !m.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InputError::time("minute must be two digits"));
        }

        // Digits only and at most two of them, so these cannot overflow
        let hour: u8 = h.parse().map_err(|_| InputError::time("expected HH:MM"))?;
        let minute: u8 = m.parse().map_err(|_| InputError::time("expected HH:MM"))?;

        Self::new(hour, minute)
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Render as `HHMM`, zero-padded.
    pub fn to_hhmm(&self) -> String {
        format!("{:02}{:02}", self.hour, self.minute)
    }
}

impl fmt::Display for TripTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn every_valid_time_parses(hour in 0u8..24, minute in 0u8..60) {
            let padded = TripTime::parse(&format!("{hour:02}:{minute:02}")).unwrap();
            let short = TripTime::parse(&format!("{hour}:{minute:02}")).unwrap();
            prop_assert_eq!(padded, short);
            prop_assert_eq!(padded.to_hhmm(), format!("{hour:02}{minute:02}"));
        }

        #[test]
        fn out_of_range_times_are_rejected(hour in 24u8..100, minute in 60u8..100) {
            let bad_hour = TripTime::parse(&format!("{hour}:00"));
            prop_assert!(bad_hour.is_err());
            let bad_minute = TripTime::parse(&format!("12:{minute}"));
            prop_assert!(bad_minute.is_err());
        }

        #[test]
        fn dates_render_day_month_year(days in 0i64..80_000) {
            let base = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap();
            let date = base + chrono::Duration::days(days);
            let iso = date.format("%Y-%m-%d").to_string();
            let rendered = TripDate::parse(&iso).unwrap().to_ddmmyyyy();
            prop_assert_eq!(rendered, date.format("%d%m%Y").to_string());
        }
    }
}
