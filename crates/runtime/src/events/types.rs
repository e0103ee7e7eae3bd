//! Event types for the session topics.

use room_core::{Clue, ElementId, InventoryItem, PlayerId, RoomId};
use serde::{Deserialize, Serialize};

/// Events describing what happened inside the room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RoomEvent {
    /// The player opened or poked an element.
    ElementInteraction { element: ElementId, attempts: u32 },

    /// An element transitioned locked -> unlocked (directly or through
    /// dependency propagation).
    ElementUnlocked { element: ElementId },

    /// A puzzle reported success and its rewards were applied.
    PuzzleSolved {
        element: ElementId,
        attempts: u32,
        time_spent_secs: u64,
        score: u64,
    },

    /// A hint was consumed against an element.
    HintUsed { element: ElementId, hints_used: u32 },

    /// A clue entered the room's clue list.
    ClueDiscovered(Clue),

    /// An item entered the inventory.
    ItemCollected(InventoryItem),

    /// Every element is solved. Published exactly once per run.
    RoomCompleted(RoomResults),

    /// The session was reset for an explicit retry.
    RoomReset,

    /// A non-fatal internal failure (persistence, configuration drift).
    /// Gameplay continues; the host UI decides what to show.
    SessionError { message: String },
}

/// Aggregate progress, published after every state mutation.
///
/// Carries the full completed set and clue list each time: consumers get a
/// superset snapshot, not a delta.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub room_id: RoomId,
    pub percentage: f64,
    pub completed: Vec<ElementId>,
    pub total_elements: u32,
    pub time_elapsed_secs: u64,
    pub clues: Vec<Clue>,
}

/// Final aggregate handed out when a room completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomResults {
    pub room_id: RoomId,
    pub player_id: PlayerId,
    pub score: u64,
    pub time_elapsed_secs: u64,
    pub elements_completed: Vec<ElementId>,
    pub clues_found: Vec<Clue>,
    pub hints_used: u32,
    /// Attempt counts per element, configuration order.
    pub attempts: Vec<(ElementId, u32)>,
}
