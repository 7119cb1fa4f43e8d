use std::sync::MutexGuard;

use tracing::{debug, info};

use crate::models::{ReceivedMessage, SendMessage};
use crate::rooms::{self, broadcast, release_messages, ClientId, ClientSender, Room, SharedRoom};
use crate::websocket::msg_controller_handler::{handle_controller_off_message, handle_controller_on_message};
use crate::websocket::msg_ping_handler::handle_ping_message;
use crate::websocket::msg_state_handler::handle_set_state_message;

/// One admitted connection: its identity, its room and its own outbound channel.
#[derive(Clone, Debug)]
pub struct ClientSession {
    room_id: String,
    client_id: ClientId,
    room: SharedRoom,
    tx: ClientSender,
}

impl ClientSession {
    pub fn new(room_id: impl Into<String>, client_id: ClientId, room: SharedRoom, tx: ClientSender) -> Self {
        Self {
            room_id: room_id.into(),
            client_id,
            room,
            tx,
        }
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn lock_room(&self) -> MutexGuard<'_, Room> {
        rooms::lock(&self.room)
    }

    /// Parse and dispatch one inbound text frame. Frames that are not a
    /// recognizable message are dropped.
    pub fn handle_text(&self, text: &str) {
        match serde_json::from_str::<ReceivedMessage>(text) {
            Ok(message) => self.handle_message(message),
            Err(e) => {
                debug!(room=%self.room_id, client_id=%self.client_id, "Ignoring unparseable message: {}", e);
            }
        }
    }

    pub fn handle_message(&self, message: ReceivedMessage) {
        match message {
            ReceivedMessage::ControllerOn(_) => handle_controller_on_message(self),
            ReceivedMessage::ControllerOff(_) => handle_controller_off_message(self),
            ReceivedMessage::SetState(set_state) => handle_set_state_message(&set_state, self),
            ReceivedMessage::Ping(_) => handle_ping_message(self),
            ReceivedMessage::Unknown => {
                debug!(room=%self.room_id, client_id=%self.client_id, "Ignoring message of unknown type");
            }
        }
    }

    /// Send a message to this connection only.
    pub fn reply(&self, message: &SendMessage) -> bool {
        match message.to_text() {
            Ok(text) => self.tx.send(text).is_ok(),
            Err(e) => {
                tracing::error!(room=%self.room_id, "Failed to serialize reply: {}", e);
                false
            }
        }
    }

    /// Leave the room. If this connection held control, the release is
    /// broadcast to whoever remains. Safe to call more than once.
    pub fn disconnect(&self) -> bool {
        let mut room = self.lock_room();
        let released = room.leave(&self.client_id);
        if released {
            let messages = release_messages(&room);
            broadcast(&mut room, &messages);
        }
        info!(
            room=%self.room_id,
            client_id=%self.client_id,
            released=%released,
            remaining=%room.member_count(),
            "client left room"
        );
        released
    }
}
