//! Deterministic room logic and data types shared across sessions.
//!
//! `room-core` defines the canonical rules (commands, engine, room state) and
//! exposes pure APIs that can be reused by both the runtime and offline
//! tools. All state mutation flows through [`engine::RoomEngine`], and
//! supporting crates depend on the types re-exported here.
pub mod command;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod snapshot;
pub mod state;

pub use command::{
    AddClueCommand, AddItemCommand, AdvanceClockCommand, Command, CommandTransition, ElementError,
    ElementPatch, InteractCommand, LogTimeCommand, ResetCommand, SolveCommand, SolveError,
    SolveOutcome, UnlockCommand, UpdateElementCommand, UseHintCommand,
};
pub use config::{
    AmbienceConfig, ConfigError, ElementConfig, PuzzleConfig, PuzzleKind, RewardConfig, RoomConfig,
};
pub use engine::{
    CommandResult, ExecuteError, ExecutionOutcome, RoomEngine, TransitionPhase,
    TransitionPhaseError,
};
pub use env::{RoomEnv, Timestamp};
pub use error::{EngineError, ErrorSeverity, NeverError};
pub use snapshot::{RoomSnapshot, SNAPSHOT_VERSION, slot_key};
pub use state::{
    Clue, ClueKind, CrossRoomClue, ElementEntry, ElementId, ElementState, InventoryItem, ItemKind,
    PlayerId, RoomId, RoomProgress, RoomState,
};
