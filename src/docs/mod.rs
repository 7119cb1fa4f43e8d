use utoipa::OpenApi;
use crate::models::*;

/// Usage hints
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Links to the host and viewer pages", body = UsageResponse)
    )
)]
#[allow(dead_code)]
pub async fn index_doc() {}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
#[allow(dead_code)]
pub async fn health_check_doc() {}

/// Readiness check endpoint
#[utoipa::path(
    get,
    path = "/api/ready",
    responses(
        (status = 200, description = "Service is ready", body = HealthResponse)
    )
)]
#[allow(dead_code)]
pub async fn ready_check_doc() {}

/// Room and process statistics
#[utoipa::path(
    get,
    path = "/api/v1/diagnostics",
    responses(
        (status = 200, description = "Current diagnostics", body = DiagnosticsResponse)
    )
)]
#[allow(dead_code)]
pub async fn diagnostics_doc() {}

/// Presenter and viewer pages
#[utoipa::path(
    get,
    path = "/host",
    responses(
        (status = 200, description = "Host page", body = String, content_type = "text/html"),
        (status = 404, description = "Page missing from the static directory", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn host_page_doc() {}

#[utoipa::path(
    get,
    path = "/view",
    responses(
        (status = 200, description = "Viewer page", body = String, content_type = "text/html"),
        (status = 404, description = "Page missing from the static directory", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn view_page_doc() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        index_doc,
        health_check_doc,
        ready_check_doc,
        diagnostics_doc,
        host_page_doc,
        view_page_doc,
    ),
    components(
        schemas(UsageResponse, UsageLinks, HealthResponse, DiagnosticsResponse, ErrorResponse)
    ),
    tags(
        (name = "api", description = "API endpoints")
    )
)]
pub struct ApiDoc;
