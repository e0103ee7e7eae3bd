//! Element unlock and dependency propagation.

use super::{CommandTransition, ElementError};
use crate::env::RoomEnv;
use crate::state::{ElementId, RoomState};

/// Unlocks one element, then runs dependency propagation.
///
/// Idempotent: unlocking an already-unlocked element succeeds and reports no
/// transition for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnlockCommand {
    pub element: ElementId,
}

impl UnlockCommand {
    pub fn new(element: impl Into<ElementId>) -> Self {
        Self {
            element: element.into(),
        }
    }
}

impl CommandTransition for UnlockCommand {
    type Error = ElementError;
    /// Ids that transitioned locked -> unlocked, in configuration order.
    type Result = Vec<ElementId>;

    fn pre_validate(&self, state: &RoomState, _env: &RoomEnv<'_>) -> Result<(), Self::Error> {
        if state.element(&self.element).is_none() {
            return Err(ElementError::NotFound {
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
        let mut unlocked = Vec::new();
        if unlock_element(state, env, &self.element) {
            unlocked.push(self.element.clone());
        }
        unlocked.extend(propagate_unlocks(state, env));
        Ok(unlocked)
    }
}

/// Unlocks a single element. Returns true iff it transitioned.
pub(crate) fn unlock_element(
    state: &mut RoomState,
    env: &RoomEnv<'_>,
    element: &ElementId,
) -> bool {
    let now = env.now();
    match state.element_mut(element) {
        Some(entry) if !entry.is_unlocked => {
            entry.is_unlocked = true;
            entry.last_interaction = Some(now);
            true
        }
        _ => false,
    }
}

/// Runs dependency propagation to fixpoint.
///
/// Any element whose (non-empty) dependency list is fully solved becomes
/// unlocked; repeated until no element transitions, so correctness never
/// depends on call ordering. Returns the newly unlocked ids in
/// configuration order.
pub(crate) fn propagate_unlocks(state: &mut RoomState, env: &RoomEnv<'_>) -> Vec<ElementId> {
    let mut unlocked = Vec::new();
    loop {
        let mut changed = false;
        for element in &env.config().elements {
            if element.dependencies.is_empty() {
                continue;
            }
            let already = state
                .element(&element.id)
                .map(|entry| entry.is_unlocked)
                .unwrap_or(true);
            if already {
                continue;
            }
            let satisfied = element.dependencies.iter().all(|dependency| {
                state
                    .element(dependency)
                    .map(|entry| entry.is_solved)
                    .unwrap_or(false)
            });
            if satisfied && unlock_element(state, env, &element.id) {
                unlocked.push(element.id.clone());
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    unlocked
}
