//! Turn scheduling and action execution pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. It
//! validates who may act, drives actions through the transition phases, and
//! converts base costs into scheduling intervals.

mod errors;
mod transition;
mod turns;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

use crate::action::{Action, ActionResult};
use crate::config::GameConfig;
use crate::env::GameEnv;
use crate::state::{Ai, EntityId, GameState};

/// Outcome of a successful action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionOutcome {
    pub result: ActionResult,
    /// Ticks until the actor's next turn, already scaled by its speed.
    pub cost: u64,
    /// The actor's confusion wore off at the end of this action.
    pub confusion_ended: bool,
}

/// Game engine that manages action execution and turn scheduling.
///
/// All state mutations flow through the three-phase action pipeline:
/// pre_validate → apply → post_validate
pub struct GameEngine<'a> {
    state: &'a mut GameState,
    config: &'a GameConfig,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState, config: &'a GameConfig) -> Self {
        Self { state, config }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    pub fn config(&self) -> &GameConfig {
        self.config
    }

    /// Executes an action for the current actor.
    ///
    /// On failure the world is unchanged when the error is `Impossible`. On
    /// success the action nonce advances and the returned cost is the
    /// interval the caller should schedule the actor at.
    pub fn execute(
        &mut self,
        env: GameEnv<'_>,
        action: &Action,
    ) -> Result<ActionOutcome, ExecuteError> {
        let actor = action.actor();
        self.validate_actor(actor)?;

        let completed = transition::execute_transition(action, self.state, &env, self.config)?;
        if matches!(completed.result, ActionResult::Escaped) {
            return Ok(ActionOutcome {
                result: completed.result,
                cost: 0,
                confusion_ended: false,
            });
        }

        self.state.turn.nonce += 1;
        let confusion_ended = self.tick_confusion(actor);
        let cost = self
            .state
            .entities
            .actor(actor)
            .map_or(completed.base_cost, |state| state.scaled_cost(completed.base_cost));

        Ok(ActionOutcome {
            result: completed.result,
            cost,
            confusion_ended,
        })
    }

    fn validate_actor(&self, actor: EntityId) -> Result<(), ExecuteError> {
        let current = self.state.turn.current_actor;
        if current != Some(actor) {
            return Err(ExecuteError::ActorNotCurrent { actor, current });
        }
        let alive = self
            .state
            .entities
            .actor(actor)
            .is_some_and(|state| state.is_alive());
        if !alive {
            return Err(ExecuteError::ActorNotAlive(actor));
        }
        Ok(())
    }

    /// Counts down a confusion after its bearer acted. A confusion at zero
    /// turns gives way to the behavior it replaced.
    fn tick_confusion(&mut self, actor: EntityId) -> bool {
        let Some(state) = self.state.entities.actor_mut(actor) else {
            return false;
        };
        match &mut state.ai {
            Ai::Confused {
                turns_remaining: 0,
                previous,
            } => {
                let previous = std::mem::replace(previous.as_mut(), Ai::Dead);
                state.ai = previous;
                true
            }
            Ai::Confused {
                turns_remaining, ..
            } => {
                *turns_remaining -= 1;
                false
            }
            _ => false,
        }
    }
}
