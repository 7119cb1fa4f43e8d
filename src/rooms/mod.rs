//! Room state, the registry that owns it and room-wide fan-out.
//!
//! Every room lives behind its own mutex. Mutations and the broadcast they
//! trigger run inside a single critical section, and member channels are
//! unbounded, so nothing inside that section awaits.

pub mod broadcast;
pub mod registry;
pub mod room;

use std::sync::{Mutex, MutexGuard};

pub use broadcast::{broadcast, release_messages};
pub use registry::{RegistryStats, RoomRegistry, SharedRoom};
pub use room::{clamp_page, clamp_pdf_id, ClientId, ClientSender, Room, SetStateOutcome, MAX_PAGE, MIN_PAGE};

/// Lock a mutex, recovering the guard if a previous holder panicked.
pub fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
