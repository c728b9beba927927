//! Web frontend for the trip form.
//!
//! Every request drives its own [`NavigationController`](crate::controller::NavigationController)
//! over a [`RecordingSurface`](crate::controller::RecordingSurface) and renders
//! what the controller left on it.

mod dto;
mod routes;
mod state;
mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, PageController, SharedStops, StopSource};
pub use templates::*;
