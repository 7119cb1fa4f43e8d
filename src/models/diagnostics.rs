use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response for diagnostics information
#[derive(Serialize, Deserialize, ToSchema)]
pub struct DiagnosticsResponse {
    pub service_name: String,
    pub started_at: DateTime<Utc>,
    pub uptime_secs: i64,
    pub n_rooms: u32,
    pub n_conn: u32,
    pub n_controlled_rooms: u32,
    pub cpu_usage: f32,
    pub memory_alloc: u64,
    pub memory_total: u64,
    pub memory_free: u64,
}
