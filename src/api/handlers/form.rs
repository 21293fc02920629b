//! Form handlers: render, submit, list.

use axum::extract::State;
use axum::extract::rejection::FormRejection;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use axum::{Form, Router};

use crate::api::dto::SubmitForm;
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};

/// Where a successful submission sends the browser.
pub const LIST_PATH: &str = "/list";

/// `GET /` — The submission form.
///
/// # Errors
///
/// Returns [`GatewayError::Template`] if the page cannot be rendered.
#[utoipa::path(
    get,
    path = "/",
    tag = "Form",
    summary = "Submission form",
    responses(
        (status = 200, description = "HTML form", content_type = "text/html", body = String),
    )
)]
pub async fn form_page(State(state): State<AppState>) -> Result<Html<String>, GatewayError> {
    Ok(Html(state.pages.form()?))
}

/// `POST /submit` — Store one value, then redirect to the list.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidForm`] (422) when `value` is missing or the
/// body cannot be decoded, and [`GatewayError::PersistenceError`] (500) when
/// the write fails.
#[utoipa::path(
    post,
    path = "/submit",
    tag = "Form",
    summary = "Store a value",
    request_body(content = SubmitForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Stored; redirect to /list"),
        (status = 422, description = "Missing or malformed `value`", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse),
    )
)]
pub async fn submit_value(
    State(state): State<AppState>,
    form: Result<Form<SubmitForm>, FormRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Form(form) = form.map_err(|rejection| GatewayError::InvalidForm(rejection.body_text()))?;

    let record = state.store.insert(&form.value).await?;
    state.metrics.record_created();
    tracing::info!(id = record.id, "record stored");

    Ok((StatusCode::FOUND, [(header::LOCATION, LIST_PATH)]))
}

/// `GET /list` — Every stored record as an HTML table.
///
/// # Errors
///
/// Returns [`GatewayError::PersistenceError`] if the records cannot be read,
/// or [`GatewayError::Template`] if the page cannot be rendered.
#[utoipa::path(
    get,
    path = "/list",
    tag = "Form",
    summary = "List stored values",
    responses(
        (status = 200, description = "HTML table of records", content_type = "text/html", body = String),
        (status = 500, description = "Database failure", body = ErrorResponse),
    )
)]
pub async fn list_records(State(state): State<AppState>) -> Result<Html<String>, GatewayError> {
    let records = state.store.list_all().await?;
    tracing::debug!(count = records.len(), "listing records");
    Ok(Html(state.pages.list(&records)?))
}

/// Form routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(form_page))
        .route("/submit", post(submit_value))
        .route(LIST_PATH, get(list_records))
}
