//! HTTP route handlers.

use askama::Template;
use axum::{
    Form, Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{debug, error, warn};

use crate::controller::{ResultsState, SubmitOutcome};
use crate::domain::{Field, select_best};

use super::dto::*;
use super::state::{AppState, PageController};
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/stops/search", get(search_stops))
        .route("/navigate", post(navigate))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// The trip form.
///
/// The search button submits the form here with `from_address`; clicking a
/// candidate comes back with `pick` set to its id.
async fn index_page(
    State(state): State<AppState>,
    Query(query): Query<IndexQuery>,
) -> Result<Response, AppError> {
    let controller = state.page_controller();
    controller.show_destination();

    controller.fill(Field::Date, query.date.as_deref().unwrap_or_default());
    controller.fill(Field::Time, query.time.as_deref().unwrap_or_default());

    let address = query.from_address.as_deref().unwrap_or_default();
    controller.fill(Field::FromAddress, address);
    if !address.trim().is_empty() {
        controller.search_now(address).await;
    }

    if let Some(pick) = query.pick.as_deref() {
        match controller.candidates().iter().position(|l| l.id == pick) {
            Some(index) => {
                controller.select_candidate(index);
            }
            None => debug!(pick, address, "picked stop no longer among candidates"),
        }
    }

    render_page(&controller, StatusCode::OK)
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Search stops for a free-text address.
async fn search_stops(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(req): Query<StopSearchRequest>,
) -> Result<Response, AppError> {
    let controller = state.page_controller();
    controller.search_now(&req.q).await;
    let view = controller.surface().view();

    // Return HTML or JSON based on Accept header
    if accepts_html(&headers) {
        let template = StopListTemplate {
            results: ResultsPanel::from_view(&view),
        };
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;

        return Ok(Html(html).into_response());
    }

    let locations = match view.results {
        ResultsState::Candidates(locations) => locations,
        ResultsState::Failed(message) => return Err(AppError::BadGateway { message }),
        ResultsState::Blank | ResultsState::Searching | ResultsState::Empty(_) => Vec::new(),
    };

    let best = select_best(&locations).map(|l| l.id.clone());
    let stops = locations.iter().map(StopResult::from).collect();

    Ok(Json(StopSearchResponse { stops, best }).into_response())
}

/// Validate the form and send the browser to the journey planner.
async fn navigate(
    State(state): State<AppState>,
    Form(form): Form<NavigateForm>,
) -> Result<Response, AppError> {
    let controller = state.page_controller();
    controller.show_destination();

    controller.fill(Field::Date, &form.date);
    controller.fill(Field::Time, &form.time);
    controller.fill(Field::FromAddress, &form.from_address);
    if let Some(location) = form.selection() {
        controller.restore_selection(location);
    }

    match controller.submit().await {
        SubmitOutcome::Opened(url) => Ok(Redirect::to(&url).into_response()),
        SubmitOutcome::Invalid(_) | SubmitOutcome::NoStopFound => {
            render_page(&controller, StatusCode::UNPROCESSABLE_ENTITY)
        }
        SubmitOutcome::LookupFailed => render_page(&controller, StatusCode::BAD_GATEWAY),
        SubmitOutcome::Busy => {
            warn!("submit while another submit was in flight");
            Err(AppError::Conflict {
                message: "Submit already in progress".to_string(),
            })
        }
    }
}

fn render_page(controller: &PageController, status: StatusCode) -> Result<Response, AppError> {
    let template = IndexTemplate::from_view(&controller.surface().view());
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;

    Ok((status, Html(html)).into_response())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadGateway { message: String },
    Conflict { message: String },
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message.clone()),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message.clone()),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        };

        error!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
