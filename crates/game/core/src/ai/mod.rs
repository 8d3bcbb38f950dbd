//! Action selection for autonomous actors.
//!
//! Behaviors only *choose* an action from a read-only view of the state; the
//! engine performs it like any player action. Everything here is a pure
//! function of the state and the oracles, so replays pick identical actions.

use crate::action::{Action, CardinalDirection};
use crate::env::{GameEnv, OracleError, rng_context};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{Ai, EntityId, GameState, Position};

use strum::IntoEnumIterator;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AiError {
    #[error("actor {0} not found on the map")]
    ActorNotFound(EntityId),

    #[error("actor {0} does not choose its own actions")]
    NotAutonomous(EntityId),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for AiError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            AiError::ActorNotFound(_) | AiError::NotAutonomous(_) => ErrorSeverity::Internal,
            AiError::Oracle(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AiError::ActorNotFound(_) => "AI_ACTOR_NOT_FOUND",
            AiError::NotAutonomous(_) => "AI_NOT_AUTONOMOUS",
            AiError::Oracle(error) => error.error_code(),
        }
    }
}

/// Chooses the next action for a non-player actor.
pub fn take_turn(state: &GameState, env: &GameEnv<'_>, actor: EntityId) -> Result<Action, AiError> {
    let behavior = &state
        .entities
        .actor(actor)
        .ok_or(AiError::ActorNotFound(actor))?
        .ai;

    match behavior {
        Ai::Hostile => hostile(state, env, actor),
        Ai::Confused {
            turns_remaining, ..
        } => confused(state, env, actor, *turns_remaining),
        Ai::Player | Ai::Dead => Err(AiError::NotAutonomous(actor)),
    }
}

/// Chase and attack the player while visible to them; otherwise wait.
fn hostile(state: &GameState, env: &GameEnv<'_>, actor: EntityId) -> Result<Action, AiError> {
    let origin = state
        .entities
        .position(actor)
        .ok_or(AiError::ActorNotFound(actor))?;
    let Some(target) = state
        .player_position()
        .filter(|_| state.is_player_alive())
    else {
        return Ok(Action::wait(actor));
    };

    // Visibility is symmetric: seen by the player means able to see them.
    if !state.world.is_visible(origin) {
        return Ok(Action::wait(actor));
    }

    if origin.distance(target) < 2.0 {
        return Ok(CardinalDirection::toward(origin, target)
            .map_or_else(|| Action::wait(actor), |direction| Action::melee(actor, direction)));
    }

    let step = env
        .path()?
        .first_step_toward(env.map()?, &state.entities, origin, target);
    Ok(step
        .and_then(|step| CardinalDirection::from_delta(step.x - origin.x, step.y - origin.y))
        .map_or_else(|| Action::wait(actor), |direction| Action::step(actor, direction)))
}

/// Stagger in a random direction; bump into whatever is there.
///
/// A direction that could neither move nor attack degrades to waiting. The
/// turn spent at zero remaining turns is the one where the confusion lifts.
fn confused(
    state: &GameState,
    env: &GameEnv<'_>,
    actor: EntityId,
    turns_remaining: u32,
) -> Result<Action, AiError> {
    if turns_remaining == 0 {
        return Ok(Action::wait(actor));
    }

    let origin = state
        .entities
        .position(actor)
        .ok_or(AiError::ActorNotFound(actor))?;
    let seed = crate::env::compute_seed(
        state.game_seed,
        state.turn.nonce,
        actor.0,
        rng_context::CONFUSED_STEP,
    );
    let directions: Vec<CardinalDirection> = CardinalDirection::iter().collect();
    let direction = directions[env.rng()?.index(seed, directions.len())];
    let destination = direction.step(origin);

    if is_bump_target(state, actor, destination) || is_open(state, env, destination)? {
        Ok(Action::bump(actor, direction))
    } else {
        Ok(Action::wait(actor))
    }
}

fn is_bump_target(state: &GameState, actor: EntityId, destination: Position) -> bool {
    state
        .entities
        .actor_at(destination)
        .is_some_and(|target| target.id != actor)
}

fn is_open(state: &GameState, env: &GameEnv<'_>, destination: Position) -> Result<bool, AiError> {
    Ok(env.map()?.is_walkable(destination)
        && state.entities.blocking_entity_at(destination).is_none())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::testing::*;

    fn setup(orc_at: Position) -> (GameState, Oracles, EntityId) {
        let mut state = state_with_player(Position::new(5, 5));
        let orc = state.entities.spawn(orc_blueprint(), orc_at);
        let oracles = Oracles::new(TestMap::new(30, 12));
        oracles.refresh_fov(&mut state, &GameConfig::default());
        (state, oracles, orc)
    }

    #[test]
    fn hostile_attacks_when_adjacent() {
        let (state, oracles, orc) = setup(Position::new(6, 6));
        let action = take_turn(&state, &oracles.env(), orc).unwrap();
        assert_eq!(action, Action::melee(orc, CardinalDirection::NorthWest));
    }

    #[test]
    fn hostile_walks_the_path_when_far() {
        let (state, oracles, orc) = setup(Position::new(9, 5));
        let action = take_turn(&state, &oracles.env(), orc).unwrap();
        assert_eq!(action, Action::step(orc, CardinalDirection::West));
    }

    #[test]
    fn hostile_waits_when_unseen() {
        let (state, oracles, orc) = setup(Position::new(25, 5));
        let action = take_turn(&state, &oracles.env(), orc).unwrap();
        assert_eq!(action, Action::wait(orc));
    }

    #[test]
    fn recovering_confusion_waits() {
        let (mut state, oracles, orc) = setup(Position::new(9, 5));
        state.entities.actor_mut(orc).unwrap().ai = Ai::Hostile.confused(0);
        let action = take_turn(&state, &oracles.env(), orc).unwrap();
        assert_eq!(action, Action::wait(orc));
    }

    #[test]
    fn confused_choice_is_reproducible() {
        let (mut state, oracles, orc) = setup(Position::new(9, 5));
        state.entities.actor_mut(orc).unwrap().ai = Ai::Hostile.confused(5);

        let first = take_turn(&state, &oracles.env(), orc).unwrap();
        let second = take_turn(&state, &oracles.env(), orc).unwrap();
        assert_eq!(first, second);
        assert!(matches!(first, Action::Bump(_) | Action::Wait(_)));
    }

    #[test]
    fn player_and_dead_do_not_choose() {
        let (mut state, oracles, orc) = setup(Position::new(9, 5));
        let player = state.player;
        assert_eq!(
            take_turn(&state, &oracles.env(), player),
            Err(AiError::NotAutonomous(player))
        );

        state.entities.actor_mut(orc).unwrap().ai = Ai::Dead;
        assert_eq!(
            take_turn(&state, &oracles.env(), orc),
            Err(AiError::NotAutonomous(orc))
        );
    }
}
