//! Generic element-state patches.

use serde::{Deserialize, Serialize};

use super::{CommandTransition, ElementError};
use crate::env::RoomEnv;
use crate::state::{ElementId, RoomState};

/// Field-level patch for one element's bookkeeping state.
///
/// `is_unlocked` and `is_solved` are deliberately absent: those flags are
/// monotone and only move through the unlock and solve commands.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementPatch {
    pub is_active: Option<bool>,
    pub attempts: Option<u32>,
    pub hints_used: Option<u32>,
    pub time_spent_secs: Option<u64>,
}

/// Applies a pure field patch to one element's state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateElementCommand {
    pub element: ElementId,
    pub patch: ElementPatch,
}

impl UpdateElementCommand {
    pub fn new(element: impl Into<ElementId>, patch: ElementPatch) -> Self {
        Self {
            element: element.into(),
            patch,
        }
    }
}

impl CommandTransition for UpdateElementCommand {
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

    fn apply(&self, state: &mut RoomState, env: &RoomEnv<'_>) -> Result<(), Self::Error> {
        let Some(entry) = state.element_mut(&self.element) else {
            return Err(ElementError::NotFound {
                element: self.element.clone(),
            });
        };
        if let Some(is_active) = self.patch.is_active {
            entry.is_active = is_active;
        }
        if let Some(attempts) = self.patch.attempts {
            entry.attempts = attempts;
        }
        if let Some(hints_used) = self.patch.hints_used {
            entry.hints_used = hints_used;
        }
        if let Some(time_spent_secs) = self.patch.time_spent_secs {
            entry.time_spent_secs = time_spent_secs;
        }
        entry.last_interaction = Some(env.now());
        Ok(())
    }
}
