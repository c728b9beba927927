//! Domain types for trip planning.
//!
//! Candidate stops, the destination context, and the trip form with its
//! validation rules. Parsed inputs enforce their invariants at construction
//! time, so code that receives them can trust their validity.

mod destination;
mod form;
mod input;
mod location;

pub use destination::{DEFAULT_DESTINATION_ADDRESS, DestinationContext, FALLBACK_DESTINATION_ID};
pub use form::{
    Field, FieldError, FormState, MSG_ADDRESS_REQUIRED, MSG_DATE_INVALID, MSG_DATE_REQUIRED,
    MSG_SELECTION_REQUIRED, MSG_TIME_INVALID, MSG_TIME_REQUIRED, ValidationResult,
    ValidationRules, validate_navigation, validate_with,
};
pub use input::{InputError, TripDate, TripTime};
pub use location::{Location, select_best};
