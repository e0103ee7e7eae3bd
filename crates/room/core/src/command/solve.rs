//! Solving an element and applying its rewards.

use super::error::{ElementError, SolveError};
use super::unlock::{propagate_unlocks, unlock_element};
use super::CommandTransition;
use crate::config::{RewardConfig, SOLVE_SCORE};
use crate::env::RoomEnv;
use crate::state::{Clue, ClueKind, CrossRoomClue, ElementId, InventoryItem, RoomState};

/// Marks an element solved and applies its rewards in declaration order.
///
/// Solving an already-solved element is a typed error and leaves the state
/// untouched, so rewards are never applied twice.
#[derive(Clone, Debug, PartialEq)]
pub struct SolveCommand {
    pub element: ElementId,
    pub rewards: Vec<RewardConfig>,
}

impl SolveCommand {
    pub fn new(element: impl Into<ElementId>, rewards: Vec<RewardConfig>) -> Self {
        Self {
            element: element.into(),
            rewards,
        }
    }
}

/// Everything one solve produced, reported back for event emission.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SolveOutcome {
    pub attempts: u32,
    pub time_spent_secs: u64,
    /// Flat solve score plus any `Score` rewards.
    pub score_awarded: u64,
    /// Ids that transitioned locked -> unlocked, dependency propagation
    /// included, in the order they unlocked.
    pub unlocked: Vec<ElementId>,
    pub clues: Vec<Clue>,
    pub items: Vec<InventoryItem>,
    /// Emitted for the external relay; never stored in this room's state.
    pub cross_room: Vec<CrossRoomClue>,
}

impl CommandTransition for SolveCommand {
    type Error = SolveError;
    type Result = SolveOutcome;

    fn pre_validate(&self, state: &RoomState, _env: &RoomEnv<'_>) -> Result<(), Self::Error> {
        let element = state
            .element(&self.element)
            .ok_or_else(|| ElementError::NotFound {
                element: self.element.clone(),
            })?;
        if !element.is_unlocked {
            return Err(ElementError::Locked {
                element: self.element.clone(),
            }
            .into());
        }
        if element.is_solved {
            return Err(ElementError::AlreadySolved {
                element: self.element.clone(),
            }
            .into());
        }
        // Reward targets are checked before any mutation so a bad config
        // cannot leave a half-applied solve behind.
        for reward in &self.rewards {
            if let RewardConfig::Unlock { targets } = reward {
                for target in targets {
                    if state.element(target).is_none() {
                        return Err(SolveError::UnknownRewardTarget {
                            element: self.element.clone(),
                            target: target.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut RoomState,
        env: &RoomEnv<'_>,
    ) -> Result<Self::Result, Self::Error> {
        let now = env.now();
        let mut outcome = SolveOutcome::default();

        {
            let Some(entry) = state.element_mut(&self.element) else {
                return Err(ElementError::NotFound {
                    element: self.element.clone(),
                }
                .into());
            };
            entry.is_solved = true;
            entry.is_active = false;
            entry.last_interaction = Some(now);
            outcome.attempts = entry.attempts;
            outcome.time_spent_secs = entry.time_spent_secs;
        }

        // Solving may satisfy dependents regardless of declared rewards.
        outcome.unlocked.extend(propagate_unlocks(state, env));

        for reward in &self.rewards {
            match reward {
                RewardConfig::Unlock { targets } => {
                    for target in targets {
                        if unlock_element(state, env, target) {
                            outcome.unlocked.push(target.clone());
                        }
                        outcome.unlocked.extend(propagate_unlocks(state, env));
                    }
                }
                RewardConfig::Clue {
                    title,
                    description,
                    data,
                } => {
                    let clue = Clue {
                        id: format!("{}-{}", self.element, now),
                        source_element: self.element.clone(),
                        source_room: state.room_id.clone(),
                        kind: ClueKind::Local,
                        title: title.clone(),
                        description: description.clone(),
                        data: data.clone(),
                        discovered_at: now,
                    };
                    state.push_clue(clue.clone());
                    outcome.clues.push(clue);
                }
                RewardConfig::Item {
                    name,
                    description,
                    kind,
                } => {
                    let item = InventoryItem {
                        id: format!("{}-{}", self.element, now),
                        name: name.clone(),
                        description: description.clone(),
                        kind: *kind,
                        source_element: self.element.clone(),
                        acquired_at: now,
                    };
                    state.push_item(item.clone());
                    outcome.items.push(item);
                }
                RewardConfig::Score { points } => {
                    outcome.score_awarded += points;
                }
                RewardConfig::CrossRoom {
                    target_room,
                    clue_kind,
                    value,
                    description,
                } => {
                    outcome.cross_room.push(CrossRoomClue {
                        source_room: state.room_id.clone(),
                        target_room: target_room.clone(),
                        clue_kind: *clue_kind,
                        value: value.clone(),
                        description: description.clone(),
                    });
                }
            }
        }

        outcome.score_awarded += SOLVE_SCORE;
        state.add_score(outcome.score_awarded);

        Ok(outcome)
    }

    fn post_validate(&self, state: &RoomState, _env: &RoomEnv<'_>) -> Result<(), Self::Error> {
        let solved = state
            .element(&self.element)
            .map(|entry| entry.is_solved)
            .unwrap_or(false);
        if !solved {
            return Err(ElementError::NotFound {
                element: self.element.clone(),
            }
            .into());
        }
        Ok(())
    }
}
