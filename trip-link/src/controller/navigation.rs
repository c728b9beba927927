//! The navigation controller.
//!
//! Owns the form state and turns page events (load, keystrokes, candidate
//! selection, submit) into surface updates and, eventually, one opened deep
//! link. All decisions live here; the [`UiSurface`] only renders.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::deeplink::DeepLinkBuilder;
use crate::domain::{
    DestinationContext, Field, FormState, Location, TripDate, TripTime, ValidationResult,
    ValidationRules, select_best, validate_with,
};
use crate::efa::StopLookup;

use super::debounce::{DEFAULT_DEBOUNCE, Debouncer};
use super::surface::{
    MSG_ADDRESS_NOT_FOUND, MSG_NO_COORDINATES, MSG_NO_RESULTS, MSG_SEARCH_FAILED, ResultsView,
    UiSurface,
};

/// How the origin stop is determined on submit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitMode {
    /// The user picks a candidate from the search-as-you-type list.
    #[default]
    Selection,
    /// No list: the typed address is looked up on submit and its best stop
    /// is used.
    LookupOnSubmit,
}

/// Controller configuration.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Quiet period before a typed address is searched.
    pub debounce: Duration,
    pub submit_mode: SubmitMode,
}

impl ControllerConfig {
    pub fn new(debounce: Duration, submit_mode: SubmitMode) -> Self {
        Self {
            debounce,
            submit_mode,
        }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            submit_mode: SubmitMode::Selection,
        }
    }
}

/// Where the form currently is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ControllerState {
    #[default]
    Idle,
    Searching,
    ResultsShown,
    Submitting,
}

/// What a submit attempt did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The deep link was opened.
    Opened(String),
    /// The form failed validation; nothing was opened.
    Invalid(ValidationResult),
    /// The typed address matched no stop.
    NoStopFound,
    /// Looking up the typed address failed.
    LookupFailed,
    /// A submit is already in progress.
    Busy,
}

#[derive(Debug, Default)]
struct Session {
    state: ControllerState,
    form: FormState,
    candidates: Vec<Location>,
    selected: Option<Location>,
}

impl Session {
    fn clear_selection(&mut self) -> bool {
        self.form.selected_location = false;
        self.selected.take().is_some()
    }
}

/// State shared with debounced searches.
struct Shared<L, S> {
    lookup: L,
    surface: S,
    destination: Arc<DestinationContext>,
    links: DeepLinkBuilder,
    submit_mode: SubmitMode,
    session: Mutex<Session>,
    /// Incremented for every search issued; responses from older searches
    /// are discarded.
    generation: AtomicU64,
}

impl<L: StopLookup, S: UiSurface> Shared<L, S> {
    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Drop the response of any search still in flight.
    fn discard_in_flight(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        let was_searching = {
            let mut session = self.session();
            let was_searching = session.state == ControllerState::Searching;
            if was_searching {
                session.state = ControllerState::Idle;
            }
            was_searching
        };
        if was_searching {
            self.surface.render_results(ResultsView::Cleared);
        }
    }

    async fn search(&self, address: &str) {
        if address.trim().is_empty() {
            return;
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut session = self.session();
            session.state = ControllerState::Searching;
            session.candidates.clear();
            session.clear_selection();
        }
        self.surface.render_results(ResultsView::Searching);

        let result = self.lookup.lookup(address).await;

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(address, generation, "discarding superseded search response");
            return;
        }

        match result {
            Ok(locations) => {
                debug!(address, count = locations.len(), "stop search finished");
                {
                    let mut session = self.session();
                    session.state = ControllerState::ResultsShown;
                    session.candidates = locations.clone();
                }
                if locations.is_empty() {
                    self.surface.render_results(ResultsView::Empty(MSG_NO_RESULTS));
                } else {
                    self.surface
                        .render_results(ResultsView::Candidates(&locations));
                }
            }
            Err(e) => {
                warn!(address, error = %e, "stop search failed");
                self.session().state = ControllerState::Idle;
                self.surface
                    .render_results(ResultsView::Failed(MSG_SEARCH_FAILED));
            }
        }
    }
}

/// Drives the trip form.
///
/// Events are delivered one at a time by the host. Debounced searches run on
/// the tokio runtime and report back through the same surface.
pub struct NavigationController<L, S> {
    shared: Arc<Shared<L, S>>,
    debouncer: Debouncer,
}

impl<L, S> NavigationController<L, S>
where
    L: StopLookup + 'static,
    S: UiSurface,
{
    pub fn new(
        lookup: L,
        surface: S,
        destination: Arc<DestinationContext>,
        links: DeepLinkBuilder,
        config: ControllerConfig,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                lookup,
                surface,
                destination,
                links,
                submit_mode: config.submit_mode,
                session: Mutex::new(Session::default()),
                generation: AtomicU64::new(0),
            }),
            debouncer: Debouncer::new(config.debounce),
        }
    }

    /// Initial page load: show the destination and resolve its stop.
    ///
    /// Lookup failures are logged and otherwise silent; deep links then use
    /// the fallback destination. Once resolved, the stored stop is shown
    /// without another lookup.
    pub async fn load(&self) -> Option<Location> {
        let shared = &self.shared;
        if let Some(stop) = shared.destination.stop() {
            self.show_destination();
            return Some(stop.clone());
        }

        let address = shared.destination.address();
        shared.surface.show_destination(address);

        let locations = match shared.lookup.lookup(address).await {
            Ok(locations) => locations,
            Err(e) => {
                error!(address, error = %e, "failed to resolve destination");
                return None;
            }
        };

        let Some(best) = select_best(&locations).cloned() else {
            warn!(address, "destination lookup returned no stops");
            shared.surface.show_best_stop(MSG_NO_COORDINATES);
            return None;
        };

        shared.surface.show_best_stop(&best.to_string());
        if shared.destination.resolve(best.clone()) {
            info!(address, id = %best.id, name = %best.name, "destination resolved");
        } else {
            debug!(address, "destination already resolved, keeping first stop");
        }

        Some(best)
    }

    /// Show the destination as resolved so far, without a lookup.
    pub fn show_destination(&self) {
        let shared = &self.shared;
        shared.surface.show_destination(shared.destination.address());
        match shared.destination.stop() {
            Some(stop) => shared.surface.show_best_stop(&stop.to_string()),
            None => shared.surface.show_best_stop(MSG_NO_COORDINATES),
        }
    }

    /// A keystroke changed a field.
    ///
    /// Clears that field's error. Changing the origin address drops the
    /// current selection and schedules a debounced search; an empty address
    /// cancels any pending search instead.
    pub fn on_input(&self, field: Field, value: &str) {
        let deselected = {
            let mut session = self.shared.session();
            session.form.set_value(field, value);
            field == Field::FromAddress && session.clear_selection()
        };

        self.shared.surface.clear_field_error(field);
        if deselected {
            self.shared.surface.mark_selected(None);
        }

        if field == Field::FromAddress {
            self.schedule_search(value);
        }
    }

    /// Set a field's value without treating it as a keystroke.
    ///
    /// For hosts that receive the whole form at once. Setting the address
    /// drops the selection but does not search.
    pub fn fill(&self, field: Field, value: &str) {
        let deselected = {
            let mut session = self.shared.session();
            session.form.set_value(field, value);
            field == Field::FromAddress && session.clear_selection()
        };

        self.shared.surface.set_field_value(field, value);
        if deselected {
            self.shared.surface.mark_selected(None);
        }
    }

    fn schedule_search(&self, value: &str) {
        if self.shared.submit_mode == SubmitMode::LookupOnSubmit {
            return;
        }

        if value.trim().is_empty() {
            if self.debouncer.cancel() {
                debug!("empty address, pending search cancelled");
            }
            self.shared.discard_in_flight();
            return;
        }

        let shared = Arc::clone(&self.shared);
        let address = value.to_string();
        self.debouncer.schedule(async move {
            shared.search(&address).await;
        });
    }

    /// Search immediately, bypassing the debounce.
    pub async fn search_now(&self, address: &str) {
        self.debouncer.cancel();
        self.shared.search(address).await;
    }

    /// Select the candidate at `index`. Returns `false` if there is none.
    pub fn select_candidate(&self, index: usize) -> bool {
        let location = {
            let mut session = self.shared.session();
            let Some(location) = session.candidates.get(index).cloned() else {
                return false;
            };
            session.form.from_address = location.name.clone();
            session.form.selected_location = true;
            session.selected = Some(location.clone());
            location
        };

        // A pending search would replace the list the user just picked from
        self.debouncer.cancel();

        let surface = &self.shared.surface;
        surface.mark_selected(Some(index));
        surface.set_field_value(Field::FromAddress, &location.name);
        surface.clear_field_errors();

        debug!(index, id = %location.id, name = %location.name, "candidate selected");
        true
    }

    /// A key was pressed on a candidate. Enter selects it.
    pub fn on_candidate_key(&self, index: usize, key: &str) -> bool {
        key == "Enter" && self.select_candidate(index)
    }

    /// Restore a selection made on an earlier page, showing it as the only
    /// candidate.
    pub fn restore_selection(&self, location: Location) {
        {
            let mut session = self.shared.session();
            session.candidates = vec![location];
            session.state = ControllerState::ResultsShown;
        }
        let candidates = self.candidates();
        self.shared
            .surface
            .render_results(ResultsView::Candidates(&candidates));
        self.select_candidate(0);
    }

    /// Validate the form and, if it passes, open the deep link.
    pub async fn submit(&self) -> SubmitOutcome {
        let shared = &self.shared;

        let (form, selected) = {
            let session = shared.session();
            if session.state == ControllerState::Submitting {
                return SubmitOutcome::Busy;
            }
            (session.form.clone(), session.selected.clone())
        };

        let rules = ValidationRules {
            require_selection: shared.submit_mode == SubmitMode::Selection,
        };
        let validation = validate_with(&form, rules);
        if !validation.is_valid() {
            warn!(
                errors = validation.errors().len(),
                first_error = validation.first_error(),
                "form validation failed"
            );
            shared.surface.show_field_errors(validation.errors());
            return SubmitOutcome::Invalid(validation);
        }
        shared.surface.clear_field_errors();

        // validate_with applies the same parsers, so this only guards the
        // ordering
        let (Ok(date), Ok(time)) = (TripDate::parse(&form.date), TripTime::parse(&form.time))
        else {
            return SubmitOutcome::Invalid(validation);
        };

        let origin = match shared.submit_mode {
            SubmitMode::Selection => match selected {
                Some(location) => location,
                None => return SubmitOutcome::Invalid(validation),
            },
            SubmitMode::LookupOnSubmit => match self.lookup_origin(&form.from_address).await {
                Ok(location) => location,
                Err(outcome) => return outcome,
            },
        };

        let url = shared.links.build_for(
            &origin.id,
            date,
            time,
            shared.destination.destination_id().unwrap_or(""),
        );

        info!(origin = %origin.id, %date, %time, %url, "opening deep link");
        shared.surface.open_in_new_context(&url);

        SubmitOutcome::Opened(url)
    }

    /// Look the typed address up while the submit control is busy.
    async fn lookup_origin(&self, address: &str) -> Result<Location, SubmitOutcome> {
        let shared = &self.shared;

        let previous = {
            let mut session = shared.session();
            std::mem::replace(&mut session.state, ControllerState::Submitting)
        };
        shared.surface.set_busy(true);

        let result = shared.lookup.lookup(address).await;

        shared.surface.set_busy(false);
        shared.session().state = previous;

        match result {
            Ok(locations) => match select_best(&locations) {
                Some(best) => Ok(best.clone()),
                None => {
                    warn!(address, "no stop found for origin address");
                    shared
                        .surface
                        .render_results(ResultsView::Empty(MSG_ADDRESS_NOT_FOUND));
                    Err(SubmitOutcome::NoStopFound)
                }
            },
            Err(e) => {
                warn!(address, error = %e, "origin lookup failed");
                shared
                    .surface
                    .render_results(ResultsView::Failed(MSG_SEARCH_FAILED));
                Err(SubmitOutcome::LookupFailed)
            }
        }
    }

    pub fn state(&self) -> ControllerState {
        self.shared.session().state
    }

    pub fn form(&self) -> FormState {
        self.shared.session().form.clone()
    }

    pub fn candidates(&self) -> Vec<Location> {
        self.shared.session().candidates.clone()
    }

    pub fn selected(&self) -> Option<Location> {
        self.shared.session().selected.clone()
    }

    pub fn destination(&self) -> &DestinationContext {
        &self.shared.destination
    }

    pub fn surface(&self) -> &S {
        &self.shared.surface
    }

    /// Whether a debounced search is waiting to fire.
    pub fn search_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}
