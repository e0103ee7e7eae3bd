//! Clue records: immutable discoveries, locally scoped or shared.

use serde::{Deserialize, Serialize};

use super::{ElementId, RoomId};
use crate::env::Timestamp;

/// Scope of a clue.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ClueKind {
    /// Discovered and consumed within the same room.
    Local,
    /// Destined for a different room's shared pool.
    CrossRoom,
    /// Arrived from another room through the external relay.
    Shared,
}

/// Immutable record of a discovery. Append-only; never mutated or removed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Clue {
    pub id: String,
    pub source_element: ElementId,
    pub source_room: RoomId,
    pub kind: ClueKind,
    pub title: String,
    pub description: String,
    /// Free-form payload interpreted by puzzle components, not the engine.
    pub data: serde_json::Value,
    pub discovered_at: Timestamp,
}

/// Reward payload destined for a different room's shared clue pool.
///
/// The engine's responsibility ends at emitting this record, exactly once,
/// synchronously within the solve that produced it. Delivery is the external
/// relay's concern and is never assumed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CrossRoomClue {
    pub source_room: RoomId,
    pub target_room: RoomId,
    pub clue_kind: ClueKind,
    pub value: serde_json::Value,
    pub description: String,
}
