use tracing::{debug, info};

use crate::models::SendMessage;
use crate::rooms::{broadcast, release_messages};
use crate::websocket::session::ClientSession;

/// Handle `controller_on`: the sender takes control, whoever held it before.
pub fn handle_controller_on_message(session: &ClientSession) {
    let mut room = session.lock_room();
    let previous = room.controller_id().map(str::to_string);

    let Some(controller_id) = room.take_control(session.client_id()) else {
        debug!(room=%session.room_id(), client_id=%session.client_id(), "controller_on from a connection no longer in the room");
        return;
    };

    info!(room=%session.room_id(), controller_id=%controller_id, previous=?previous, "controller taken");
    let messages = [
        SendMessage::controller_changed(Some(controller_id)),
        SendMessage::Snapshot(room.snapshot()),
    ];
    broadcast(&mut room, &messages);
}

/// Handle `controller_off`. Only the current controller can release; anyone
/// else gets no reply.
pub fn handle_controller_off_message(session: &ClientSession) {
    let mut room = session.lock_room();
    if !room.release_control(session.client_id()) {
        debug!(room=%session.room_id(), client_id=%session.client_id(), "controller_off ignored; not the controller");
        return;
    }

    info!(room=%session.room_id(), client_id=%session.client_id(), "controller released");
    let messages = release_messages(&room);
    broadcast(&mut room, &messages);
}
