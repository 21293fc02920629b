//! HTTP layer: route handlers, DTOs, OpenAPI document and router
//! composition.

pub mod dto;
pub mod handlers;

use axum::Router;
use axum::middleware;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::app_state::AppState;
use crate::error::{ErrorBody, ErrorResponse};

/// OpenAPI description of every route.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "input-gateway", description = "Form submission gateway backed by PostgreSQL"),
    paths(
        handlers::form::form_page,
        handlers::form::submit_value,
        handlers::form::list_records,
        handlers::system::liveness_handler,
        handlers::system::readiness_handler,
        handlers::system::metrics_handler,
    ),
    components(schemas(
        dto::SubmitForm,
        dto::LivenessResponse,
        dto::ReadinessResponse,
        ErrorResponse,
        ErrorBody,
    )),
    tags(
        (name = "Form", description = "HTML form, submission and listing"),
        (name = "System", description = "Health checks and metrics"),
    )
)]
pub struct ApiDoc;

/// Builds the complete application: routes, metrics middleware, request
/// tracing and (with the `swagger-ui` feature) the API explorer.
pub fn build_router(state: AppState) -> Router {
    let router = handlers::routes()
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            crate::metrics::track_metrics,
        ))
        .layer(TraceLayer::new_for_http());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    router.with_state(state)
}
