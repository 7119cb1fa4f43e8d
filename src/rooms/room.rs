use std::collections::HashMap;

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::models::SnapshotMessage;

/// Opaque per-connection identifier. Issued fresh on every admission.
pub type ClientId = String;

/// Outbound half of a member's writer channel. Carries serialized JSON text frames.
pub type ClientSender = mpsc::UnboundedSender<String>;

pub const MIN_PAGE: u32 = 1;
pub const MAX_PAGE: u32 = 9999;

/// Result of a cursor change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetStateOutcome {
    Accepted { pdf_id: u32, page: u32 },
    /// The requester is not the current controller. Nothing was changed.
    Rejected,
}

/// Authoritative state of one synchronization session.
///
/// Members are keyed by their client id, so membership and identity are
/// always added and removed together.
#[derive(Debug)]
pub struct Room {
    members: HashMap<ClientId, ClientSender>,
    controller_id: Option<ClientId>,
    pdf_id: u32,
    page: u32,
    total_pdfs: u32,
}

impl Room {
    pub fn new(total_pdfs: u32) -> Self {
        Self {
            members: HashMap::new(),
            controller_id: None,
            pdf_id: 1,
            page: MIN_PAGE,
            total_pdfs: total_pdfs.max(1),
        }
    }

    /// Register a connection and hand back its freshly minted id.
    pub fn join(&mut self, sender: ClientSender) -> ClientId {
        let client_id = Uuid::new_v4().to_string();
        self.members.insert(client_id.clone(), sender);
        client_id
    }

    /// Remove a member. Returns true when the member held control, meaning a
    /// release has to be broadcast. Unknown ids are ignored.
    pub fn leave(&mut self, client_id: &str) -> bool {
        if self.members.remove(client_id).is_none() {
            return false;
        }
        if self.controller_id.as_deref() == Some(client_id) {
            self.controller_id = None;
            return true;
        }
        false
    }

    /// Takeover: the claimant becomes controller regardless of who held it.
    /// Only current members can claim control.
    pub fn take_control(&mut self, client_id: &str) -> Option<ClientId> {
        if !self.members.contains_key(client_id) {
            return None;
        }
        self.controller_id = Some(client_id.to_string());
        self.controller_id.clone()
    }

    /// Clear control if `client_id` holds it. Stale releases are no-ops.
    pub fn release_control(&mut self, client_id: &str) -> bool {
        if self.is_controller(client_id) {
            self.controller_id = None;
            true
        } else {
            false
        }
    }

    pub fn set_state(&mut self, client_id: &str, requested_pdf_id: i64, requested_page: i64) -> SetStateOutcome {
        if !self.is_controller(client_id) {
            return SetStateOutcome::Rejected;
        }
        self.pdf_id = clamp_pdf_id(requested_pdf_id, self.total_pdfs);
        self.page = clamp_page(requested_page);
        SetStateOutcome::Accepted {
            pdf_id: self.pdf_id,
            page: self.page,
        }
    }

    pub fn snapshot(&self) -> SnapshotMessage {
        SnapshotMessage {
            controller_id: self.controller_id.clone(),
            pdf_id: self.pdf_id,
            page: self.page,
            total_pdfs: self.total_pdfs,
        }
    }

    pub fn is_controller(&self, client_id: &str) -> bool {
        self.controller_id.as_deref() == Some(client_id)
    }

    pub fn is_member(&self, client_id: &str) -> bool {
        self.members.contains_key(client_id)
    }

    pub fn controller_id(&self) -> Option<&str> {
        self.controller_id.as_deref()
    }

    pub fn pdf_id(&self) -> u32 {
        self.pdf_id
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pdfs(&self) -> u32 {
        self.total_pdfs
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Queue `text` to one member. False when the member is gone or its channel is closed.
    pub fn send_to(&self, client_id: &str, text: &str) -> bool {
        self.members
            .get(client_id)
            .map(|tx| tx.send(text.to_string()).is_ok())
            .unwrap_or(false)
    }

    /// Queue `text` to every member and return the ids whose channel is closed.
    pub(crate) fn deliver_all(&self, text: &str) -> Vec<ClientId> {
        self.members
            .iter()
            .filter(|(_, tx)| tx.send(text.to_string()).is_err())
            .map(|(id, _)| id.clone())
            .collect()
    }
}

pub fn clamp_pdf_id(pdf_id: i64, total_pdfs: u32) -> u32 {
    pdf_id.clamp(1, i64::from(total_pdfs.max(1))) as u32
}

pub fn clamp_page(page: i64) -> u32 {
    page.clamp(i64::from(MIN_PAGE), i64::from(MAX_PAGE)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(room: &mut Room) -> (ClientId, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (room.join(tx), rx)
    }

    #[test]
    fn new_room_starts_at_first_page_without_controller() {
        let room = Room::new(3);
        assert_eq!(
            room.snapshot(),
            SnapshotMessage { controller_id: None, pdf_id: 1, page: 1, total_pdfs: 3 }
        );
        assert!(room.is_empty());
    }

    #[test]
    fn join_issues_unique_ids() {
        let mut room = Room::new(3);
        let (a, _ra) = member(&mut room);
        let (b, _rb) = member(&mut room);
        assert_ne!(a, b);
        assert_eq!(room.member_count(), 2);
        assert!(room.is_member(&a) && room.is_member(&b));
    }

    #[test]
    fn last_claimant_takes_control() {
        let mut room = Room::new(3);
        let (a, _ra) = member(&mut room);
        let (b, _rb) = member(&mut room);
        let (c, _rc) = member(&mut room);

        for id in [&a, &b, &c, &a, &c] {
            assert_eq!(room.take_control(id).as_deref(), Some(id.as_str()));
            assert_eq!(room.controller_id(), Some(id.as_str()));
        }
    }

    #[test]
    fn non_member_cannot_take_control() {
        let mut room = Room::new(3);
        let (a, _ra) = member(&mut room);
        room.take_control(&a);
        assert_eq!(room.take_control("ghost"), None);
        assert_eq!(room.controller_id(), Some(a.as_str()));
    }

    #[test]
    fn stale_release_does_not_touch_new_controller() {
        let mut room = Room::new(3);
        let (a, _ra) = member(&mut room);
        let (b, _rb) = member(&mut room);
        room.take_control(&a);
        room.take_control(&b);

        assert!(!room.release_control(&a));
        assert_eq!(room.controller_id(), Some(b.as_str()));

        assert!(room.release_control(&b));
        assert_eq!(room.controller_id(), None);
    }

    #[test]
    fn set_state_from_non_controller_is_rejected() {
        let mut room = Room::new(3);
        let (a, _ra) = member(&mut room);
        let (b, _rb) = member(&mut room);
        room.take_control(&a);

        assert_eq!(room.set_state(&b, 2, 8), SetStateOutcome::Rejected);
        assert_eq!((room.pdf_id(), room.page()), (1, 1));
    }

    #[test]
    fn set_state_clamps_into_range() {
        let mut room = Room::new(3);
        let (a, _ra) = member(&mut room);
        room.take_control(&a);

        assert_eq!(room.set_state(&a, 999, -5), SetStateOutcome::Accepted { pdf_id: 3, page: 1 });
        assert_eq!(room.set_state(&a, -7, 10_000), SetStateOutcome::Accepted { pdf_id: 1, page: 9999 });
        assert_eq!(room.set_state(&a, i64::MAX, i64::MIN), SetStateOutcome::Accepted { pdf_id: 3, page: 1 });
        assert_eq!(room.set_state(&a, 2, 42), SetStateOutcome::Accepted { pdf_id: 2, page: 42 });
        assert_eq!((room.pdf_id(), room.page()), (2, 42));
    }

    #[test]
    fn leaving_controller_owes_release() {
        let mut room = Room::new(3);
        let (a, _ra) = member(&mut room);
        let (b, _rb) = member(&mut room);
        room.take_control(&a);

        assert!(!room.leave(&b));
        assert_eq!(room.controller_id(), Some(a.as_str()));
        assert!(room.leave(&a));
        assert_eq!(room.controller_id(), None);
        assert!(room.is_empty());
    }

    #[test]
    fn leave_is_idempotent() {
        let mut room = Room::new(3);
        let (a, _ra) = member(&mut room);
        room.take_control(&a);

        assert!(room.leave(&a));
        assert!(!room.leave(&a));
        assert!(!room.leave("never-joined"));
        assert_eq!(room.member_count(), 0);
    }

    #[test]
    fn deliver_all_reports_closed_channels() {
        let mut room = Room::new(3);
        let (a, mut ra) = member(&mut room);
        let (b, rb) = member(&mut room);
        drop(rb);

        let dead = room.deliver_all("hi");
        assert_eq!(dead, vec![b.clone()]);
        assert_eq!(ra.try_recv().as_deref(), Ok("hi"));
        assert!(room.send_to(&a, "direct"));
        assert!(!room.send_to(&b, "direct"));
    }

    #[test]
    fn catalog_size_is_at_least_one() {
        let room = Room::new(0);
        assert_eq!(room.total_pdfs(), 1);
        assert_eq!(clamp_pdf_id(5, 0), 1);
    }
}
