//! Real-time presentation sync relay.
//!
//! Viewers connect to `/ws/{room}` and follow a shared cursor (`pdf_id`,
//! `page`). At most one member of a room is the controller; claiming control
//! always succeeds and displaces the previous controller.

pub mod config;
pub mod docs;
pub mod handlers;
pub mod models;
pub mod rooms;
pub mod routes;
pub mod state;
pub mod utils;
pub mod websocket;

pub use config::Config;
pub use routes::create_app_routes;
pub use state::AppState;
