//! HTTP endpoint handlers organized by concern.

pub mod form;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes the form and system routes.
pub fn routes() -> Router<AppState> {
    Router::new().merge(form::routes()).merge(system::routes())
}
