//! The rendering surface the controller drives.

use std::sync::Arc;

use crate::domain::{Field, FieldError, Location};

pub const MSG_NO_COORDINATES: &str = "Keine Koordinaten gefunden";
pub const MSG_SEARCHING: &str = "Suche läuft…";
pub const MSG_NO_RESULTS: &str = "Keine Ergebnisse gefunden";
pub const MSG_SEARCH_FAILED: &str = "Fehler bei der Suche nach Haltestellen";
pub const MSG_ADDRESS_NOT_FOUND: &str =
    "Keine Adresse gefunden. Bitte versuchen Sie eine andere Adresse.";
pub const LIST_LABEL: &str = "Gefundene Haltestellen";

/// What the results area shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResultsView<'a> {
    /// Nothing to show; the address was cleared.
    Cleared,
    /// A search is in flight.
    Searching,
    /// Selectable candidates, rendered as a `listbox` of `option`s.
    Candidates(&'a [Location]),
    /// Informational message: nothing matched.
    Empty(&'static str),
    /// The lookup failed; the user can retry by typing.
    Failed(&'static str),
}

/// Everything the controller needs from the page.
///
/// Implementations only render; all decisions are made by the controller.
/// Methods are called from whichever task completes an event, never
/// concurrently for the same controller.
pub trait UiSurface: Send + Sync + 'static {
    /// Show the fixed destination address.
    fn show_destination(&self, address: &str);

    /// Show the resolved destination stop, or a not-found message.
    fn show_best_stop(&self, text: &str);

    /// Replace the contents of the results area.
    fn render_results(&self, view: ResultsView<'_>);

    /// Mark one candidate as selected (`aria-selected="true"`) and all
    /// others as not selected. `None` deselects everything.
    fn mark_selected(&self, index: Option<usize>);

    /// Overwrite an input's value.
    fn set_field_value(&self, field: Field, value: &str);

    /// Show inline errors beneath the offending fields, replacing any shown
    /// before.
    fn show_field_errors(&self, errors: &[FieldError]);

    /// Remove the error shown for one field.
    fn clear_field_error(&self, field: Field);

    /// Remove all field errors.
    fn clear_field_errors(&self);

    /// Toggle the submit control between busy (spinner, disabled) and idle.
    fn set_busy(&self, busy: bool);

    /// Open a URL in a new browsing context.
    fn open_in_new_context(&self, url: &str);
}

/// Surfaces are usually shared between the controller and whoever renders
/// the page.
impl<S: UiSurface> UiSurface for Arc<S> {
    fn show_destination(&self, address: &str) {
        (**self).show_destination(address)
    }

    fn show_best_stop(&self, text: &str) {
        (**self).show_best_stop(text)
    }

    fn render_results(&self, view: ResultsView<'_>) {
        (**self).render_results(view)
    }

    fn mark_selected(&self, index: Option<usize>) {
        (**self).mark_selected(index)
    }

    fn set_field_value(&self, field: Field, value: &str) {
        (**self).set_field_value(field, value)
    }

    fn show_field_errors(&self, errors: &[FieldError]) {
        (**self).show_field_errors(errors)
    }

    fn clear_field_error(&self, field: Field) {
        (**self).clear_field_error(field)
    }

    fn clear_field_errors(&self) {
        (**self).clear_field_errors()
    }

    fn set_busy(&self, busy: bool) {
        (**self).set_busy(busy)
    }

    fn open_in_new_context(&self, url: &str) {
        (**self).open_in_new_context(url)
    }
}
