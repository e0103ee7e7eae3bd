//! In-memory SnapshotRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use room_core::{PlayerId, RoomId, RoomSnapshot, slot_key};

use super::error::{RepositoryError, Result};
use super::traits::SnapshotRepository;

/// In-memory implementation of [`SnapshotRepository`].
///
/// Slots are indexed by their slot key. The default repository when no
/// persistent storage is wired in.
pub struct InMemorySnapshotRepository {
    slots: RwLock<HashMap<String, RoomSnapshot>>,
}

impl InMemorySnapshotRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemorySnapshotRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotRepository for InMemorySnapshotRepository {
    fn save(&self, snapshot: &RoomSnapshot) -> Result<()> {
        let mut slots = self
            .slots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        slots.insert(
            slot_key(&snapshot.room_id, &snapshot.player_id),
            snapshot.clone(),
        );
        Ok(())
    }

    fn load(&self, room_id: &RoomId, player_id: &PlayerId) -> Result<Option<RoomSnapshot>> {
        let slots = self
            .slots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(slots.get(&slot_key(room_id, player_id)).cloned())
    }

    fn exists(&self, room_id: &RoomId, player_id: &PlayerId) -> bool {
        self.slots
            .read()
            .map(|slots| slots.contains_key(&slot_key(room_id, player_id)))
            .unwrap_or(false)
    }

    fn delete(&self, room_id: &RoomId, player_id: &PlayerId) -> Result<()> {
        let mut slots = self
            .slots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        slots.remove(&slot_key(room_id, player_id));
        Ok(())
    }
}
