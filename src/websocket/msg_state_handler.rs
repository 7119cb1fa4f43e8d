use tracing::{error, info, warn};

use crate::models::{SendMessage, SetStateMessage};
use crate::rooms::{broadcast, SetStateOutcome};
use crate::websocket::session::ClientSession;

pub const NOT_CONTROLLER_MESSAGE: &str = "You are not the current controller. Turn controller on first.";

/// Handle SetStateMessage
pub fn handle_set_state_message(set_state: &SetStateMessage, session: &ClientSession) {
    let mut room = session.lock_room();

    // Missing fields keep the committed value
    let requested_pdf_id = set_state.pdf_id.unwrap_or_else(|| i64::from(room.pdf_id()));
    let requested_page = set_state.page.unwrap_or_else(|| i64::from(room.page()));

    match room.set_state(session.client_id(), requested_pdf_id, requested_page) {
        SetStateOutcome::Accepted { pdf_id, page } => {
            info!(room=%session.room_id(), pdf_id=%pdf_id, page=%page, "state changed");
            let messages = [
                SendMessage::state_changed(pdf_id, page),
                SendMessage::Snapshot(room.snapshot()),
            ];
            broadcast(&mut room, &messages);
        }
        SetStateOutcome::Rejected => {
            drop(room);
            warn!(room=%session.room_id(), client_id=%session.client_id(), "set_state rejected; sender is not the controller");
            if !session.reply(&SendMessage::error(NOT_CONTROLLER_MESSAGE)) {
                error!("Failed to queue Error message for room {}", session.room_id());
            }
        }
    }
}
