//! Command domain: every state mutation is a command.
//!
//! Each command implements [`CommandTransition`] and is driven through the
//! `pre_validate -> apply -> post_validate` pipeline by
//! [`crate::engine::RoomEngine`]. Validation failures leave the state
//! untouched; an operation on an unknown element id is a typed error, never
//! a silent no-op and never a corruption.

mod clue;
mod error;
mod hint;
mod interact;
mod inventory;
mod reset;
mod solve;
mod time;
mod unlock;
mod update;

pub use clue::AddClueCommand;
pub use error::{ElementError, SolveError};
pub use hint::UseHintCommand;
pub use interact::InteractCommand;
pub use inventory::AddItemCommand;
pub use reset::ResetCommand;
pub use solve::{SolveCommand, SolveOutcome};
pub use time::{AdvanceClockCommand, LogTimeCommand};
pub use unlock::UnlockCommand;
pub use update::{ElementPatch, UpdateElementCommand};

use crate::env::RoomEnv;
use crate::state::{ElementId, RoomState};

/// Defines how a concrete command variant mutates room state.
pub trait CommandTransition {
    type Error;
    type Result;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &RoomState, _env: &RoomEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the command by mutating the room state directly.
    fn apply(&self, state: &mut RoomState, env: &RoomEnv<'_>)
    -> Result<Self::Result, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &RoomState, _env: &RoomEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Top-level command enum routed through [`crate::engine::RoomEngine`].
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Interact(InteractCommand),
    Unlock(UnlockCommand),
    Solve(SolveCommand),
    UpdateElement(UpdateElementCommand),
    AddClue(AddClueCommand),
    AddItem(AddItemCommand),
    UseHint(UseHintCommand),
    LogTime(LogTimeCommand),
    AdvanceClock(AdvanceClockCommand),
    Reset(ResetCommand),
}

impl Command {
    /// The element this command addresses, if any.
    pub fn element(&self) -> Option<&ElementId> {
        match self {
            Command::Interact(cmd) => Some(&cmd.element),
            Command::Unlock(cmd) => Some(&cmd.element),
            Command::Solve(cmd) => Some(&cmd.element),
            Command::UpdateElement(cmd) => Some(&cmd.element),
            Command::UseHint(cmd) => Some(&cmd.element),
            Command::LogTime(cmd) => Some(&cmd.element),
            Command::AddClue(_)
            | Command::AddItem(_)
            | Command::AdvanceClock(_)
            | Command::Reset(_) => None,
        }
    }

    /// Stable name for logs and metrics.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Interact(_) => "interact",
            Command::Unlock(_) => "unlock",
            Command::Solve(_) => "solve",
            Command::UpdateElement(_) => "update_element",
            Command::AddClue(_) => "add_clue",
            Command::AddItem(_) => "add_item",
            Command::UseHint(_) => "use_hint",
            Command::LogTime(_) => "log_time",
            Command::AdvanceClock(_) => "advance_clock",
            Command::Reset(_) => "reset",
        }
    }
}
