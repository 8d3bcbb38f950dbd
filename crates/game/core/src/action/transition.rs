use crate::config::GameConfig;
use crate::env::GameEnv;
use crate::error::GameError;
use crate::state::{EntityId, GameState};

/// Defines how a concrete action variant mutates game state.
///
/// Every "you can't do that" check belongs in `pre_validate`, which sees the
/// state **before** mutation: an action that fails there leaves the world
/// exactly as it was. `apply` may assume `pre_validate` passed and only fails
/// on internal inconsistencies.
pub trait ActionTransition {
    type Error: GameError;
    type Result;

    /// Entity performing the action.
    fn actor(&self) -> EntityId;

    /// Cost in ticks for an actor of normal speed.
    fn base_cost(&self, config: &GameConfig) -> u64 {
        config.turn_cost
    }

    fn pre_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Self::Result, Self::Error>;

    fn post_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}
