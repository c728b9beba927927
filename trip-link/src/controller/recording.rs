//! A surface that records what was rendered.
//!
//! Used by the web layer to turn controller output into a page, and by
//! tests to assert on it.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::{Field, FieldError, Location};

use super::surface::{ResultsView, UiSurface};

/// One call made on the surface.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Destination(String),
    BestStop(String),
    Cleared,
    Searching,
    Candidates(Vec<Location>),
    Empty(String),
    Failed(String),
    Selected(Option<usize>),
    FieldValue(Field, String),
    FieldErrors(Vec<FieldError>),
    FieldErrorCleared(Field),
    FieldErrorsCleared,
    Busy(bool),
    Opened(String),
}

/// Current contents of the results area.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ResultsState {
    #[default]
    Blank,
    Searching,
    Candidates(Vec<Location>),
    Empty(String),
    Failed(String),
}

/// The page as it currently looks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageView {
    pub destination: Option<String>,
    pub best_stop: Option<String>,
    pub results: ResultsState,
    pub selected: Option<usize>,
    pub values: HashMap<Field, String>,
    pub errors: HashMap<Field, &'static str>,
    pub busy: bool,
    pub opened: Vec<String>,
}

impl PageView {
    /// The error shown beneath a field.
    pub fn error(&self, field: Field) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    /// The last value written into a field.
    pub fn value(&self, field: Field) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    fn apply(&mut self, event: &UiEvent) {
        match event {
            UiEvent::Destination(address) => self.destination = Some(address.clone()),
            UiEvent::BestStop(text) => self.best_stop = Some(text.clone()),
            UiEvent::Cleared => {
                self.results = ResultsState::Blank;
                self.selected = None;
            }
            UiEvent::Searching => {
                self.results = ResultsState::Searching;
                self.selected = None;
            }
            UiEvent::Candidates(locations) => {
                self.results = ResultsState::Candidates(locations.clone());
                self.selected = None;
            }
            UiEvent::Empty(message) => {
                self.results = ResultsState::Empty(message.clone());
                self.selected = None;
            }
            UiEvent::Failed(message) => {
                self.results = ResultsState::Failed(message.clone());
                self.selected = None;
            }
            UiEvent::Selected(index) => self.selected = *index,
            UiEvent::FieldValue(field, value) => {
                self.values.insert(*field, value.clone());
            }
            UiEvent::FieldErrors(errors) => {
                self.errors = errors.iter().map(|e| (e.field, e.message)).collect();
            }
            UiEvent::FieldErrorCleared(field) => {
                self.errors.remove(field);
            }
            UiEvent::FieldErrorsCleared => self.errors.clear(),
            UiEvent::Busy(busy) => self.busy = *busy,
            UiEvent::Opened(url) => self.opened.push(url.clone()),
        }
    }
}

#[derive(Debug, Default)]
struct Recording {
    events: Vec<UiEvent>,
    view: PageView,
}

/// Records every surface call and folds them into a [`PageView`].
#[derive(Debug, Default)]
pub struct RecordingSurface {
    inner: Mutex<Recording>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls so far, in order.
    pub fn events(&self) -> Vec<UiEvent> {
        self.lock().events.clone()
    }

    /// The page as it looks after all calls so far.
    pub fn view(&self) -> PageView {
        self.lock().view.clone()
    }

    /// URLs opened so far.
    pub fn opened(&self) -> Vec<String> {
        self.lock().view.opened.clone()
    }

    fn record(&self, event: UiEvent) {
        let mut recording = self.lock();
        recording.view.apply(&event);
        recording.events.push(event);
    }

    fn lock(&self) -> MutexGuard<'_, Recording> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl UiSurface for RecordingSurface {
    fn show_destination(&self, address: &str) {
        self.record(UiEvent::Destination(address.to_string()));
    }

    fn show_best_stop(&self, text: &str) {
        self.record(UiEvent::BestStop(text.to_string()));
    }

    fn render_results(&self, view: ResultsView<'_>) {
        self.record(match view {
            ResultsView::Cleared => UiEvent::Cleared,
            ResultsView::Searching => UiEvent::Searching,
            ResultsView::Candidates(locations) => UiEvent::Candidates(locations.to_vec()),
            ResultsView::Empty(message) => UiEvent::Empty(message.to_string()),
            ResultsView::Failed(message) => UiEvent::Failed(message.to_string()),
        });
    }

    fn mark_selected(&self, index: Option<usize>) {
        self.record(UiEvent::Selected(index));
    }

    fn set_field_value(&self, field: Field, value: &str) {
        self.record(UiEvent::FieldValue(field, value.to_string()));
    }

    fn show_field_errors(&self, errors: &[FieldError]) {
        self.record(UiEvent::FieldErrors(errors.to_vec()));
    }

    fn clear_field_error(&self, field: Field) {
        self.record(UiEvent::FieldErrorCleared(field));
    }

    fn clear_field_errors(&self) {
        self.record(UiEvent::FieldErrorsCleared);
    }

    fn set_busy(&self, busy: bool) {
        self.record(UiEvent::Busy(busy));
    }

    fn open_in_new_context(&self, url: &str) {
        self.record(UiEvent::Opened(url.to_string()));
    }
}
