//! Command transition dispatch and execution logic.

use crate::command::{Command, CommandTransition};
use crate::env::RoomEnv;
use crate::state::RoomState;

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};
use super::CommandResult;

/// Executes a transition through the three-phase pipeline and returns the
/// result.
///
/// Phases:
/// 1. `pre_validate` - check preconditions before mutation
/// 2. `apply` - mutate the room state and return the result
/// 3. `post_validate` - verify postconditions after mutation
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut RoomState,
    env: &RoomEnv<'_>,
) -> Result<T::Result, TransitionPhaseError<T::Error>>
where
    T: CommandTransition,
{
    transition
        .pre_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let result = transition
        .apply(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(result)
}

/// Routes a command to its transition and wraps the result in
/// [`CommandResult`]. Internal implementation used by
/// [`super::RoomEngine::execute`].
pub(super) fn execute_transition(
    command: &Command,
    state: &mut RoomState,
    env: &RoomEnv<'_>,
) -> Result<CommandResult, ExecuteError> {
    match command {
        Command::Interact(transition) => {
            let attempts =
                drive_transition(transition, state, env).map_err(ExecuteError::Interact)?;
            Ok(CommandResult::Interact {
                element: transition.element.clone(),
                attempts,
            })
        }
        Command::Unlock(transition) => {
            let unlocked =
                drive_transition(transition, state, env).map_err(ExecuteError::Unlock)?;
            Ok(CommandResult::Unlock { unlocked })
        }
        Command::Solve(transition) => {
            let outcome = drive_transition(transition, state, env).map_err(ExecuteError::Solve)?;
            Ok(CommandResult::Solve {
                element: transition.element.clone(),
                outcome,
            })
        }
        Command::UpdateElement(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::UpdateElement)?;
            Ok(CommandResult::ElementUpdated {
                element: transition.element.clone(),
            })
        }
        Command::AddClue(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::AddClue)?;
            Ok(CommandResult::ClueAdded {
                clue: transition.clue.clone(),
            })
        }
        Command::AddItem(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::AddItem)?;
            Ok(CommandResult::ItemAdded {
                item: transition.item.clone(),
            })
        }
        Command::UseHint(transition) => {
            let hints_used =
                drive_transition(transition, state, env).map_err(ExecuteError::UseHint)?;
            Ok(CommandResult::HintUsed {
                element: transition.element.clone(),
                hints_used,
            })
        }
        Command::LogTime(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::LogTime)?;
            Ok(CommandResult::TimeLogged)
        }
        Command::AdvanceClock(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::AdvanceClock)?;
            Ok(CommandResult::ClockAdvanced)
        }
        Command::Reset(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::Reset)?;
            Ok(CommandResult::Reset)
        }
    }
}
