//! Askama templates for the web frontend.

use askama::Template;

use crate::controller::{LIST_LABEL, PageView, ResultsState};
use crate::domain::{Field, Location};

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// The trip form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub destination: String,
    pub best_stop: String,
    pub date: String,
    pub time: String,
    pub from_address: String,
    pub date_error: Option<&'static str>,
    pub time_error: Option<&'static str>,
    pub address_error: Option<&'static str>,
    pub results: ResultsPanel,
    /// Id of the selected candidate, posted back as `selected_id`
    pub selected_id: Option<String>,
}

impl IndexTemplate {
    /// Render the state a controller left on its surface.
    pub fn from_view(view: &PageView) -> Self {
        let selected_id = match (&view.results, view.selected) {
            (ResultsState::Candidates(locations), Some(index)) => {
                locations.get(index).map(|l| l.id.clone())
            }
            _ => None,
        };

        Self {
            destination: view.destination.clone().unwrap_or_default(),
            best_stop: view.best_stop.clone().unwrap_or_default(),
            date: view.value(Field::Date).unwrap_or_default().to_string(),
            time: view.value(Field::Time).unwrap_or_default().to_string(),
            from_address: view.value(Field::FromAddress).unwrap_or_default().to_string(),
            date_error: view.error(Field::Date),
            time_error: view.error(Field::Time),
            address_error: view.error(Field::FromAddress),
            results: ResultsPanel::from_view(view),
            selected_id,
        }
    }
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Candidate list fragment (search results).
#[derive(Template)]
#[template(path = "stop_list.html")]
pub struct StopListTemplate {
    pub results: ResultsPanel,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// The area below the address field.
#[derive(Debug, Clone, Default)]
pub struct ResultsPanel {
    /// Placeholder or error text shown instead of a list
    pub message: Option<String>,
    pub is_error: bool,
    pub options: Vec<OptionView>,
    pub label: &'static str,
}

impl ResultsPanel {
    pub fn from_view(view: &PageView) -> Self {
        let mut panel = Self {
            label: LIST_LABEL,
            ..Self::default()
        };
        match &view.results {
            ResultsState::Blank => {}
            ResultsState::Searching => {
                panel.message = Some(crate::controller::MSG_SEARCHING.to_string());
            }
            ResultsState::Candidates(locations) => {
                panel.options = locations
                    .iter()
                    .enumerate()
                    .map(|(index, location)| {
                        OptionView::new(index, location, view.selected == Some(index))
                    })
                    .collect();
            }
            ResultsState::Empty(message) => panel.message = Some(message.clone()),
            ResultsState::Failed(message) => {
                panel.message = Some(message.clone());
                panel.is_error = true;
            }
        }
        panel
    }

    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }
}

/// One candidate in the list.
#[derive(Debug, Clone)]
pub struct OptionView {
    pub index: usize,
    pub id: String,
    pub label: String,
    /// The full candidate as JSON, for scripts reading the list
    pub info_json: String,
    pub is_best: bool,
    pub selected: bool,
}

impl OptionView {
    pub fn new(index: usize, location: &Location, selected: bool) -> Self {
        Self {
            index,
            id: location.id.clone(),
            label: location.to_string(),
            info_json: serde_json::to_string(location).unwrap_or_default(),
            is_best: location.is_best,
            selected,
        }
    }

    /// Value of the `aria-selected` attribute.
    pub fn aria_selected(&self) -> &'static str {
        if self.selected { "true" } else { "false" }
    }
}
