use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    Json,
};
use tracing::{debug, error};

use crate::models::{ErrorResponse, UsageLinks, UsageResponse};
use crate::state::AppState;

/// Root endpoint: where to find the host and viewer pages
pub async fn index() -> Json<UsageResponse> {
    Json(UsageResponse {
        ok: true,
        usage: UsageLinks {
            host: "/host?room=abcd".to_string(),
            viewer: "/view?room=abcd".to_string(),
        },
    })
}

/// Page used by the presenter
pub async fn host_page(
    State(app_state): State<Arc<AppState>>,
) -> Result<Html<String>, (StatusCode, Json<ErrorResponse>)> {
    load_page(&app_state.config.static_dir, "host.html").await
}

/// Page used by the audience
pub async fn view_page(
    State(app_state): State<Arc<AppState>>,
) -> Result<Html<String>, (StatusCode, Json<ErrorResponse>)> {
    load_page(&app_state.config.static_dir, "view.html").await
}

async fn load_page(static_dir: &str, name: &str) -> Result<Html<String>, (StatusCode, Json<ErrorResponse>)> {
    let path = Path::new(static_dir).join(name);
    debug!("Serving page {}", path.display());
    match tokio::fs::read_to_string(&path).await {
        Ok(body) => Ok(Html(body)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            error!("Page {} not found", path.display());
            Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new(StatusCode::NOT_FOUND, format!("{} not found", name))),
            ))
        }
        Err(e) => {
            error!("Failed to read page {}: {}", path.display(), e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(StatusCode::INTERNAL_SERVER_ERROR, format!("Failed to read {}", name))),
            ))
        }
    }
}
