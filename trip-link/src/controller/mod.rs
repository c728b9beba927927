//! Form controller for the trip page.
//!
//! The controller owns the form state, debounces address searches, renders
//! candidates, validates on submit and opens the journey planner deep link.
//! Rendering goes through the [`UiSurface`] trait, so the decision logic runs
//! without a real page; [`RecordingSurface`] collects its output.

mod debounce;
mod navigation;
mod recording;
mod surface;

pub use debounce::{DEFAULT_DEBOUNCE, Debouncer};
pub use navigation::{
    ControllerConfig, ControllerState, NavigationController, SubmitMode, SubmitOutcome,
};
pub use recording::{PageView, RecordingSurface, ResultsState, UiEvent};
pub use surface::{
    LIST_LABEL, MSG_ADDRESS_NOT_FOUND, MSG_NO_COORDINATES, MSG_NO_RESULTS, MSG_SEARCH_FAILED,
    MSG_SEARCHING, ResultsView, UiSurface,
};
