pub mod handler;
pub mod msg_controller_handler;
pub mod msg_ping_handler;
pub mod msg_state_handler;
pub mod session;

pub use handler::websocket_handler;
pub use session::ClientSession;
