//! Time bookkeeping commands.

use super::{CommandTransition, ElementError};
use crate::env::RoomEnv;
use crate::error::NeverError;
use crate::state::{ElementId, RoomState};

/// Adds puzzle-facing seconds to one element's timer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogTimeCommand {
    pub element: ElementId,
    pub seconds: u64,
}

impl LogTimeCommand {
    pub fn new(element: impl Into<ElementId>, seconds: u64) -> Self {
        Self {
            element: element.into(),
            seconds,
        }
    }
}

impl CommandTransition for LogTimeCommand {
    type Error = ElementError;
    type Result = ();

    fn pre_validate(&self, state: &RoomState, _env: &RoomEnv<'_>) -> Result<(), Self::Error> {
        if state.element(&self.element).is_none() {
            return Err(ElementError::NotFound {
                element: self.element.clone(),
            });
        }
        Ok(())
    }

    fn apply(&self, state: &mut RoomState, _env: &RoomEnv<'_>) -> Result<(), Self::Error> {
        let Some(entry) = state.element_mut(&self.element) else {
            return Err(ElementError::NotFound {
                element: self.element.clone(),
            });
        };
        entry.time_spent_secs += self.seconds;
        Ok(())
    }
}

/// Advances the room's elapsed-time clock.
///
/// The store owns no timer; the hosting page feeds elapsed seconds in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdvanceClockCommand {
    pub seconds: u64,
}

impl AdvanceClockCommand {
    pub fn new(seconds: u64) -> Self {
        Self { seconds }
    }
}

impl CommandTransition for AdvanceClockCommand {
    type Error = NeverError;
    type Result = ();

    fn apply(&self, state: &mut RoomState, _env: &RoomEnv<'_>) -> Result<(), Self::Error> {
        state.advance_clock(self.seconds);
        Ok(())
    }
}
