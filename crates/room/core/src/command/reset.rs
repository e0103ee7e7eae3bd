//! Explicit session retry.

use super::CommandTransition;
use crate::env::RoomEnv;
use crate::error::NeverError;
use crate::state::RoomState;

/// Recomputes every element state to its initial-unlock value and clears
/// clues, inventory, score, and the clock. Never auto-invoked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResetCommand;

impl CommandTransition for ResetCommand {
    type Error = NeverError;
    type Result = ();

    fn apply(&self, state: &mut RoomState, env: &RoomEnv<'_>) -> Result<(), Self::Error> {
        state.reset(env.config());
        Ok(())
    }
}
