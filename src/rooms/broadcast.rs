use std::collections::VecDeque;

use tracing::{debug, error, info};

use super::room::Room;
use crate::models::SendMessage;

/// Deliver `messages`, in order, to every member of `room`.
///
/// Members whose channel is closed are removed through [`Room::leave`]. If one
/// of them was the controller, the release (`controller_changed` + `snapshot`)
/// is queued behind the current batch so the remaining members converge on the
/// new state. Returns the number of members removed.
pub fn broadcast(room: &mut Room, messages: &[SendMessage]) -> usize {
    let mut pending: VecDeque<SendMessage> = messages.iter().cloned().collect();
    let mut removed = 0;

    while let Some(message) = pending.pop_front() {
        let text = match message.to_text() {
            Ok(text) => text,
            Err(e) => {
                error!("Failed to serialize broadcast message {:?}: {}", message, e);
                continue;
            }
        };

        let dead = room.deliver_all(&text);
        if dead.is_empty() {
            continue;
        }

        for client_id in &dead {
            if room.leave(client_id) {
                info!(client_id=%client_id, "controller connection is gone; releasing control");
                pending.extend(release_messages(room));
            }
        }
        removed += dead.len();
        debug!(removed=%dead.len(), remaining=%room.member_count(), "removed dead members");
    }

    removed
}

/// Messages announcing that nobody holds control anymore.
pub fn release_messages(room: &Room) -> [SendMessage; 2] {
    [
        SendMessage::controller_changed(None),
        SendMessage::Snapshot(room.snapshot()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SnapshotMessage;
    use serde_json::{json, Value};
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    fn drain(rx: &mut UnboundedReceiver<String>) -> Vec<Value> {
        let mut out = Vec::new();
        while let Ok(text) = rx.try_recv() {
            out.push(serde_json::from_str(&text).expect("json"));
        }
        out
    }

    #[test]
    fn every_member_receives_the_batch_in_order() {
        let mut room = Room::new(3);
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        room.join(tx_a);
        room.join(tx_b);

        let removed = broadcast(&mut room, &[SendMessage::state_changed(2, 3), SendMessage::Pong]);
        assert_eq!(removed, 0);

        for rx in [&mut rx_a, &mut rx_b] {
            assert_eq!(
                drain(rx),
                vec![json!({"type": "state_changed", "pdf_id": 2, "page": 3}), json!({"type": "pong"})]
            );
        }
    }

    #[test]
    fn dead_member_is_dropped_without_aborting_the_batch() {
        let mut room = Room::new(3);
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, rx_b) = mpsc::unbounded_channel();
        room.join(tx_a);
        let b = room.join(tx_b);
        drop(rx_b);

        let removed = broadcast(&mut room, &[SendMessage::Pong, SendMessage::Pong]);
        assert_eq!(removed, 1);
        assert!(!room.is_member(&b));
        assert_eq!(room.member_count(), 1);
        assert_eq!(drain(&mut rx_a).len(), 2);

        // A second pass over the same room has nothing left to remove.
        assert_eq!(broadcast(&mut room, &[SendMessage::Pong]), 0);
    }

    #[test]
    fn dead_controller_is_released_to_the_rest() {
        let mut room = Room::new(3);
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, rx_b) = mpsc::unbounded_channel();
        let a = room.join(tx_a);
        let b = room.join(tx_b);
        room.take_control(&b);
        drop(rx_b);

        broadcast(&mut room, &[SendMessage::state_changed(1, 2)]);

        assert_eq!(room.controller_id(), None);
        let received = drain(&mut rx_a);
        assert_eq!(
            received,
            vec![
                json!({"type": "state_changed", "pdf_id": 1, "page": 2}),
                json!({"type": "controller_changed", "controller_id": null}),
                json!({"type": "snapshot", "controller_id": null, "pdf_id": 1, "page": 1, "total_pdfs": 3}),
            ]
        );
        assert!(room.is_member(&a));
    }

    #[test]
    fn release_messages_reflect_current_state() {
        let mut room = Room::new(5);
        let (tx, _rx) = mpsc::unbounded_channel();
        let a = room.join(tx);
        room.take_control(&a);
        room.set_state(&a, 4, 12);
        room.release_control(&a);

        let [changed, snapshot] = release_messages(&room);
        assert_eq!(changed, SendMessage::controller_changed(None));
        assert_eq!(
            snapshot,
            SendMessage::Snapshot(SnapshotMessage { controller_id: None, pdf_id: 4, page: 12, total_pdfs: 5 })
        );
    }
}
