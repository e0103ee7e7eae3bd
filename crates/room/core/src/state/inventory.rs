//! Inventory records granted by item rewards.

use serde::{Deserialize, Serialize};

use super::ElementId;
use crate::env::Timestamp;

/// Category of an inventory item.
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
pub enum ItemKind {
    Tool,
    Document,
    Sample,
    Key,
    Data,
}

/// Immutable record of a collected item. Append-only; never mutated or
/// removed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub kind: ItemKind,
    pub source_element: ElementId,
    pub acquired_at: Timestamp,
}
