use tracing::{debug, error};

use crate::models::SendMessage;
use crate::websocket::session::ClientSession;

/// Handle PingMessage
pub fn handle_ping_message(session: &ClientSession) {
    debug!(room=%session.room_id(), client_id=%session.client_id(), "Ping message received");

    // Reply with pong
    if !session.reply(&SendMessage::Pong) {
        error!("Failed to queue Pong message for room {}", session.room_id());
    }
}
