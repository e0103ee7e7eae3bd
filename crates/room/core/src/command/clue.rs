//! Direct clue appends.

use super::CommandTransition;
use crate::env::RoomEnv;
use crate::error::NeverError;
use crate::state::{Clue, RoomState};

/// Appends a clue to the room's ordered clue list.
///
/// Discovery order is preserved and duplicates are permitted; callers guard
/// against repeat ids if they need to. Used both for local discoveries and
/// for clues arriving from other rooms through the relay.
#[derive(Clone, Debug, PartialEq)]
pub struct AddClueCommand {
    pub clue: Clue,
}

impl AddClueCommand {
    pub fn new(clue: Clue) -> Self {
        Self { clue }
    }
}

impl CommandTransition for AddClueCommand {
    type Error = NeverError;
    type Result = ();

    fn apply(&self, state: &mut RoomState, _env: &RoomEnv<'_>) -> Result<(), Self::Error> {
        state.push_clue(self.clue.clone());
        Ok(())
    }
}
