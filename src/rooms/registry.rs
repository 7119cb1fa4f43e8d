use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use super::lock;
use super::room::{ClientId, ClientSender, Room};
use crate::models::SendMessage;

/// A room shared between the connections that joined it.
pub type SharedRoom = Arc<Mutex<Room>>;

/// Aggregate counts over all rooms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryStats {
    pub n_rooms: usize,
    pub n_conn: usize,
    pub n_controlled_rooms: usize,
}

/// Process-wide map from room id to room state.
///
/// Lock order is always registry first, then room.
#[derive(Debug)]
pub struct RoomRegistry {
    rooms: Mutex<HashMap<String, SharedRoom>>,
    total_pdfs: u32,
}

impl RoomRegistry {
    pub fn new(total_pdfs: u32) -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
            total_pdfs: total_pdfs.max(1),
        }
    }

    /// Look up a room, creating it on first reference.
    pub fn get_or_create(&self, room_id: &str) -> SharedRoom {
        let mut rooms = lock(&self.rooms);
        Self::entry(&mut rooms, room_id, self.total_pdfs)
    }

    fn entry(rooms: &mut HashMap<String, SharedRoom>, room_id: &str, total_pdfs: u32) -> SharedRoom {
        rooms
            .entry(room_id.to_string())
            .or_insert_with(|| {
                debug!(room=%room_id, "creating room");
                Arc::new(Mutex::new(Room::new(total_pdfs)))
            })
            .clone()
    }

    /// Admit a connection: join the room and queue `hello` followed by the
    /// current snapshot on the connection's own channel. Nothing goes to the
    /// other members.
    ///
    /// Runs under the registry lock so the reaper cannot drop the room between
    /// lookup and join.
    pub fn admit(&self, room_id: &str, sender: ClientSender) -> (SharedRoom, ClientId) {
        let mut rooms = lock(&self.rooms);
        let shared = Self::entry(&mut rooms, room_id, self.total_pdfs);
        let client_id = {
            let mut room = lock(&shared);
            let client_id = room.join(sender);
            for message in [SendMessage::hello(client_id.clone()), SendMessage::Snapshot(room.snapshot())] {
                match message.to_text() {
                    Ok(text) => {
                        room.send_to(&client_id, &text);
                    }
                    Err(e) => error!(room=%room_id, "Failed to serialize admission message: {}", e),
                }
            }
            client_id
        };
        (shared, client_id)
    }

    pub fn room_count(&self) -> usize {
        lock(&self.rooms).len()
    }

    pub fn stats(&self) -> RegistryStats {
        let rooms = lock(&self.rooms);
        let mut stats = RegistryStats {
            n_rooms: rooms.len(),
            ..RegistryStats::default()
        };
        for shared in rooms.values() {
            let room = lock(shared);
            stats.n_conn += room.member_count();
            if room.controller_id().is_some() {
                stats.n_controlled_rooms += 1;
            }
        }
        stats
    }

    /// Drop rooms that have no members. Their cursor is forgotten, so a later
    /// reference to the same id starts from a fresh room.
    pub fn reap_empty(&self) -> usize {
        let mut rooms = lock(&self.rooms);
        let before = rooms.len();
        rooms.retain(|_, shared| !lock(shared).is_empty());
        before - rooms.len()
    }

    /// Run [`RoomRegistry::reap_empty`] every `interval`.
    pub fn spawn_reaper(self: &Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let registry = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let reaped = registry.reap_empty();
                if reaped > 0 {
                    info!(reaped=%reaped, remaining=%registry.room_count(), "reaped empty rooms");
                }
            }
        })
    }
}
