use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::rooms::RoomRegistry;

/// Context shared by every HTTP and WebSocket handler.
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub registry: Arc<RoomRegistry>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let registry = Arc::new(RoomRegistry::new(config.room_total_pdfs()));
        Self {
            config,
            registry,
            started_at: Utc::now(),
        }
    }
}
