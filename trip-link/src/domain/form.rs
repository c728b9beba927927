//! Trip form state and validation.

use std::fmt;

use super::input::{TripDate, TripTime};

pub const MSG_ADDRESS_REQUIRED: &str = "Bitte geben Sie eine Startadresse ein";
pub const MSG_DATE_REQUIRED: &str = "Bitte wählen Sie ein Datum";
pub const MSG_DATE_INVALID: &str = "Bitte geben Sie ein gültiges Datum ein";
pub const MSG_TIME_REQUIRED: &str = "Bitte wählen Sie eine Uhrzeit";
pub const MSG_TIME_INVALID: &str = "Bitte geben Sie eine gültige Zeit im Format HH:MM ein";
pub const MSG_SELECTION_REQUIRED: &str = "Bitte wählen Sie eine Haltestelle aus der Liste";

/// An input field of the trip form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Date,
    Time,
    FromAddress,
}

impl Field {
    /// The element id the field is rendered with.
    pub fn id(&self) -> &'static str {
        match self {
            Field::Date => "date",
            Field::Time => "time",
            Field::FromAddress => "fromAddress",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Current contents of the trip form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    /// ISO "YYYY-MM-DD", or empty
    pub date: String,
    /// "HH:MM", or empty
    pub time: String,
    pub from_address: String,
    /// Whether a candidate from the result list is selected
    pub selected_location: bool,
}

impl FormState {
    /// Read a field's raw value.
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Date => &self.date,
            Field::Time => &self.time,
            Field::FromAddress => &self.from_address,
        }
    }

    /// Overwrite a field's raw value.
    pub fn set_value(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Date => self.date = value,
            Field::Time => self.time = value,
            Field::FromAddress => self.from_address = value,
        }
    }
}

/// A validation message attached to a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// Outcome of validating the form.
///
/// Errors keep the order in which their field first failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<FieldError>,
}

impl ValidationResult {
    /// Record an error, replacing any earlier message for the same field in
    /// place.
    fn set(&mut self, field: Field, message: &'static str) {
        match self.errors.iter_mut().find(|e| e.field == field) {
            Some(existing) => existing.message = message,
            None => self.errors.push(FieldError { field, message }),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// All errors, one per failing field.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// The message for a field, if it failed.
    pub fn error(&self, field: Field) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message)
    }

    /// The first recorded message, or an empty string when valid.
    pub fn first_error(&self) -> &'static str {
        self.errors.first().map(|e| e.message).unwrap_or("")
    }
}

/// Which checks apply on submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRules {
    /// Whether a candidate must have been picked from the result list.
    pub require_selection: bool,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            require_selection: true,
        }
    }
}

/// Validate the form before navigating.
///
/// Every check runs; all failing fields are reported together. A missing
/// selection replaces the address message when both fail.
pub fn validate_navigation(form: &FormState) -> ValidationResult {
    validate_with(form, ValidationRules::default())
}

/// Validate the form with explicit rules.
pub fn validate_with(form: &FormState, rules: ValidationRules) -> ValidationResult {
    let mut result = ValidationResult::default();

    if form.from_address.trim().is_empty() {
        result.set(Field::FromAddress, MSG_ADDRESS_REQUIRED);
    }

    if form.date.trim().is_empty() {
        result.set(Field::Date, MSG_DATE_REQUIRED);
    } else if TripDate::parse(&form.date).is_err() {
        result.set(Field::Date, MSG_DATE_INVALID);
    }

    if form.time.trim().is_empty() {
        result.set(Field::Time, MSG_TIME_REQUIRED);
    } else if TripTime::parse(&form.time).is_err() {
        result.set(Field::Time, MSG_TIME_INVALID);
    }

    if rules.require_selection && !form.selected_location {
        result.set(Field::FromAddress, MSG_SELECTION_REQUIRED);
    }

    result
}
