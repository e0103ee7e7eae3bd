//! Authoritative room state representation.
//!
//! This module owns the data structures that describe per-element progress,
//! discovered clues, inventory, and aggregate progress. Runtime layers clone
//! or query this state but mutate it exclusively through the engine.
mod clue;
mod element;
mod inventory;
mod progress;

use serde::{Deserialize, Serialize};

pub use clue::{Clue, ClueKind, CrossRoomClue};
pub use element::{ElementId, ElementState};
pub use inventory::{InventoryItem, ItemKind};
pub use progress::RoomProgress;

use crate::config::RoomConfig;

/// Identifier of one themed room.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoomId(pub String);

impl RoomId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for RoomId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// Identifier of the player owning a session.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// One element's live state paired with its id.
///
/// Entries keep the configuration's declaration order, which doubles as the
/// display order for consumers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElementEntry {
    pub id: ElementId,
    pub state: ElementState,
}

/// Canonical snapshot of one player's progress through one room.
///
/// Exclusively owned by the session for its lifetime; every mutation flows
/// through [`crate::engine::RoomEngine`], which recomputes `progress`
/// synchronously so it is never stale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoomState {
    pub room_id: RoomId,
    pub player_id: PlayerId,
    elements: Vec<ElementEntry>,
    clues: Vec<Clue>,
    inventory: Vec<InventoryItem>,
    score: u64,
    time_elapsed_secs: u64,
    progress: RoomProgress,
}

impl RoomState {
    /// Builds the initial state for every configured element.
    ///
    /// An element starts unlocked iff it declares no dependencies, unless the
    /// configuration overrides it explicitly.
    pub fn initialize(config: &RoomConfig, player_id: PlayerId) -> Self {
        let elements: Vec<ElementEntry> = config
            .elements
            .iter()
            .map(|element| ElementEntry {
                id: element.id.clone(),
                state: ElementState::initial(element),
            })
            .collect();

        let mut state = Self {
            room_id: config.id.clone(),
            player_id,
            elements,
            clues: Vec::new(),
            inventory: Vec::new(),
            score: 0,
            time_elapsed_secs: 0,
            progress: RoomProgress::default(),
        };
        state.recompute_progress();
        state
    }

    pub fn element(&self, id: &ElementId) -> Option<&ElementState> {
        self.elements
            .iter()
            .find(|entry| &entry.id == id)
            .map(|entry| &entry.state)
    }

    pub(crate) fn element_mut(&mut self, id: &ElementId) -> Option<&mut ElementState> {
        self.elements
            .iter_mut()
            .find(|entry| &entry.id == id)
            .map(|entry| &mut entry.state)
    }

    /// All element entries in configuration order.
    pub fn elements(&self) -> &[ElementEntry] {
        &self.elements
    }

    pub fn unlocked_elements(&self) -> Vec<ElementId> {
        self.ids_where(|state| state.is_unlocked)
    }

    pub fn solved_elements(&self) -> Vec<ElementId> {
        self.ids_where(|state| state.is_solved)
    }

    /// Elements the player can work on right now: unlocked and unsolved.
    pub fn available_elements(&self) -> Vec<ElementId> {
        self.ids_where(|state| state.is_unlocked && !state.is_solved)
    }

    fn ids_where(&self, predicate: impl Fn(&ElementState) -> bool) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|entry| predicate(&entry.state))
            .map(|entry| entry.id.clone())
            .collect()
    }

    /// Discovered clues in discovery order.
    pub fn clues(&self) -> &[Clue] {
        &self.clues
    }

    /// Collected inventory in acquisition order.
    pub fn inventory(&self) -> &[InventoryItem] {
        &self.inventory
    }

    pub fn progress(&self) -> RoomProgress {
        self.progress
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn time_elapsed_secs(&self) -> u64 {
        self.time_elapsed_secs
    }

    pub fn solved_count(&self) -> u32 {
        self.elements
            .iter()
            .filter(|entry| entry.state.is_solved)
            .count() as u32
    }

    pub fn total_elements(&self) -> u32 {
        self.elements.len() as u32
    }

    pub fn is_complete(&self) -> bool {
        self.total_elements() > 0 && self.solved_count() == self.total_elements()
    }

    pub fn hints_used_total(&self) -> u32 {
        self.elements
            .iter()
            .map(|entry| entry.state.hints_used)
            .sum()
    }

    /// Attempt counts per element, in configuration order.
    pub fn attempts_by_element(&self) -> Vec<(ElementId, u32)> {
        self.elements
            .iter()
            .map(|entry| (entry.id.clone(), entry.state.attempts))
            .collect()
    }

    pub(crate) fn push_clue(&mut self, clue: Clue) {
        self.clues.push(clue);
    }

    pub(crate) fn push_item(&mut self, item: InventoryItem) {
        self.inventory.push(item);
    }

    pub(crate) fn add_score(&mut self, points: u64) {
        self.score += points;
    }

    pub(crate) fn advance_clock(&mut self, seconds: u64) {
        self.time_elapsed_secs += seconds;
    }

    /// Recomputes the derived progress record from the element states.
    pub(crate) fn recompute_progress(&mut self) {
        self.progress = RoomProgress::compute(
            self.solved_count(),
            self.total_elements(),
            self.time_elapsed_secs,
        );
    }

    /// Rebuilds every element state to its initial-unlock value and clears
    /// clues, inventory, score, and the clock. Explicit retry only.
    pub(crate) fn reset(&mut self, config: &RoomConfig) {
        for entry in &mut self.elements {
            if let Some(element) = config.element(&entry.id) {
                entry.state = ElementState::initial(element);
            } else {
                entry.state = ElementState::locked();
            }
        }
        self.clues.clear();
        self.inventory.clear();
        self.score = 0;
        self.time_elapsed_secs = 0;
        self.recompute_progress();
    }

    /// Merges a persisted state over this one.
    ///
    /// Shallow merge at the top level: element entries, clues, inventory,
    /// score, and the clock are replaced wholesale. Progress is recomputed
    /// rather than trusted from the snapshot. The session's own room and
    /// player ids are kept.
    pub fn absorb_snapshot(&mut self, incoming: RoomState) {
        self.elements = incoming.elements;
        self.clues = incoming.clues;
        self.inventory = incoming.inventory;
        self.score = incoming.score;
        self.time_elapsed_secs = incoming.time_elapsed_secs;
        self.recompute_progress();
    }
}
