pub mod api;

use std::sync::Arc;

use axum::{http::HeaderValue, routing::get, Router};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::warn;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::handlers::{host_page, index, view_page};
use crate::state::AppState;
use crate::websocket::websocket_handler;

pub use api::create_api_routes;

/// Assemble every route the server exposes.
pub fn create_app_routes(app_state: Arc<AppState>) -> Router {
    let static_dir = app_state.config.static_dir.clone();
    let cors_origins = app_state.config.cors_origin_list();

    let router = Router::new()
        .route("/", get(index))
        .route("/host", get(host_page))
        .route("/view", get(view_page))
        .route("/ws/:room_id", get(websocket_handler))
        // Mount API routes
        .nest("/api", create_api_routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(app_state)
        // Mount Swagger UI
        .merge(SwaggerUi::new("/swagger").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add tracing layer
        .layer(TraceLayer::new_for_http());

    if cors_origins.is_empty() {
        return router;
    }

    let origins: Vec<HeaderValue> = cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin {}: {}", origin, e);
                None
            }
        })
        .collect();
    router.layer(CorsLayer::new().allow_origin(origins))
}
