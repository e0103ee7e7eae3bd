//! Player interaction with an element.

use super::{CommandTransition, ElementError};
use crate::env::RoomEnv;
use crate::state::{ElementId, RoomState};

/// Marks an element active and counts the attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InteractCommand {
    pub element: ElementId,
}

impl InteractCommand {
    pub fn new(element: impl Into<ElementId>) -> Self {
        Self {
            element: element.into(),
        }
    }
}

impl CommandTransition for InteractCommand {
    type Error = ElementError;
    /// Attempt count after this interaction.
    type Result = u32;

    fn pre_validate(&self, state: &RoomState, _env: &RoomEnv<'_>) -> Result<(), Self::Error> {
        let element = state
            .element(&self.element)
            .ok_or_else(|| ElementError::NotFound {
                element: self.element.clone(),
            })?;
        if !element.is_unlocked {
            return Err(ElementError::Locked {
                element: self.element.clone(),
            });
        }
        if element.is_solved {
            return Err(ElementError::AlreadySolved {
                element: self.element.clone(),
            });
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut RoomState,
        env: &RoomEnv<'_>,
    ) -> Result<Self::Result, Self::Error> {
        let Some(entry) = state.element_mut(&self.element) else {
            return Err(ElementError::NotFound {
                element: self.element.clone(),
            });
        };
        entry.is_active = true;
        entry.attempts += 1;
        entry.last_interaction = Some(env.now());
        Ok(entry.attempts)
    }
}
