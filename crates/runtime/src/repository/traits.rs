//! Repository contract for saving and loading session snapshots.

use room_core::{PlayerId, RoomId, RoomSnapshot};

use super::error::Result;

/// Repository for one-slot-per-(room, player) snapshot persistence.
///
/// The slot is read once at session creation and written on explicit save or
/// auto-save ticks. Both directions are best-effort from the session's point
/// of view: a failed load falls back to fresh state, a failed save is a soft
/// error that never halts gameplay.
pub trait SnapshotRepository: Send + Sync {
    /// Write the snapshot into its slot, replacing any previous value.
    fn save(&self, snapshot: &RoomSnapshot) -> Result<()>;

    /// Read the slot for this room and player. `Ok(None)` when absent.
    fn load(&self, room_id: &RoomId, player_id: &PlayerId) -> Result<Option<RoomSnapshot>>;

    /// Check whether the slot holds a value.
    fn exists(&self, room_id: &RoomId, player_id: &PlayerId) -> bool;

    /// Clear the slot.
    fn delete(&self, room_id: &RoomId, player_id: &PlayerId) -> Result<()>;
}
