use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Links to the host and viewer pages for an example room
#[derive(Serialize, Deserialize, ToSchema)]
pub struct UsageLinks {
    pub host: String,
    pub viewer: String,
}

/// Response of the root informational endpoint
#[derive(Serialize, Deserialize, ToSchema)]
pub struct UsageResponse {
    pub ok: bool,
    pub usage: UsageLinks,
}
