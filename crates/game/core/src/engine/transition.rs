//! Action transition dispatch.

use crate::action::{Action, ActionResult, ActionTransition, BumpResolution};
use crate::config::GameConfig;
use crate::env::GameEnv;
use crate::state::GameState;

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// A transition that ran to completion, with its base cost.
pub(super) struct Completed {
    pub result: ActionResult,
    pub base_cost: u64,
}

/// Runs `pre_validate`, `apply`, then `post_validate`.
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<T::Result, TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
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

pub(super) fn execute_transition(
    action: &Action,
    state: &mut GameState,
    env: &GameEnv<'_>,
    config: &GameConfig,
) -> Result<Completed, ExecuteError> {
    let completed = |result, base_cost| Completed { result, base_cost };

    match action {
        Action::Wait(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::Wait)?;
            Ok(completed(ActionResult::Waited, transition.base_cost(config)))
        }
        Action::Move(transition) => {
            let (from, to) = drive_transition(transition, state, env).map_err(ExecuteError::Move)?;
            Ok(completed(
                ActionResult::Moved { from, to },
                transition.base_cost(config),
            ))
        }
        Action::Melee(transition) => {
            let outcome = drive_transition(transition, state, env).map_err(ExecuteError::Melee)?;
            Ok(completed(
                ActionResult::Attacked(outcome),
                transition.base_cost(config),
            ))
        }
        Action::Bump(bump) => match bump.resolve(state) {
            BumpResolution::Move(transition) => {
                execute_transition(&Action::Move(transition), state, env, config)
            }
            BumpResolution::Melee(transition) => {
                execute_transition(&Action::Melee(transition), state, env, config)
            }
        },
        Action::Pickup(transition) => {
            let item = drive_transition(transition, state, env).map_err(ExecuteError::Pickup)?;
            Ok(completed(
                ActionResult::PickedUp { item },
                transition.base_cost(config),
            ))
        }
        Action::Consume(transition) => {
            let consumed =
                drive_transition(transition, state, env).map_err(ExecuteError::Consume)?;
            Ok(completed(
                ActionResult::Consumed(consumed),
                transition.base_cost(config),
            ))
        }
        Action::Drop(transition) => {
            let at = drive_transition(transition, state, env).map_err(ExecuteError::Drop)?;
            Ok(completed(
                ActionResult::Dropped {
                    item: transition.item,
                    at,
                },
                transition.base_cost(config),
            ))
        }
        Action::Equip(transition) => {
            let change = drive_transition(transition, state, env).map_err(ExecuteError::Equip)?;
            Ok(completed(
                ActionResult::Equipment(change),
                transition.base_cost(config),
            ))
        }
        Action::Escape { .. } => Ok(completed(ActionResult::Escaped, 0)),
    }
}
