use crate::action::{ActionTransition, CardinalDirection};
use crate::env::{GameEnv, OracleError};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, GameState, Position};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveError {
    #[error("That way is blocked.")]
    OutOfBounds { destination: Position },

    #[error("That way is blocked.")]
    Blocked { destination: Position },

    #[error("That way is blocked.")]
    Occupied {
        destination: Position,
        occupant: EntityId,
    },

    #[error("actor {0} not found on the map")]
    ActorNotFound(EntityId),

    #[error("more than one blocking entity at {position}")]
    OccupancyDesync { position: Position },

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            MoveError::OutOfBounds { .. } | MoveError::Blocked { .. } | MoveError::Occupied { .. } => {
                ErrorSeverity::Impossible
            }
            MoveError::ActorNotFound(_) | MoveError::OccupancyDesync { .. } => {
                ErrorSeverity::Internal
            }
            MoveError::Oracle(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            MoveError::OutOfBounds { .. } => "MOVE_OUT_OF_BOUNDS",
            MoveError::Blocked { .. } => "MOVE_BLOCKED",
            MoveError::Occupied { .. } => "MOVE_OCCUPIED",
            MoveError::ActorNotFound(_) => "MOVE_ACTOR_NOT_FOUND",
            MoveError::OccupancyDesync { .. } => "MOVE_OCCUPANCY_DESYNC",
            MoveError::Oracle(error) => error.error_code(),
        }
    }
}

/// Step one tile in a direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub actor: EntityId,
    pub direction: CardinalDirection,
}

impl MoveAction {
    pub fn new(actor: EntityId, direction: CardinalDirection) -> Self {
        Self { actor, direction }
    }

    fn origin(&self, state: &GameState) -> Result<Position, MoveError> {
        state
            .entities
            .position(self.actor)
            .ok_or(MoveError::ActorNotFound(self.actor))
    }
}

impl ActionTransition for MoveAction {
    type Error = MoveError;
    type Result = (Position, Position);

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let map = env.map()?;
        let destination = self.direction.step(self.origin(state)?);

        if !map.in_bounds(destination) {
            return Err(MoveError::OutOfBounds { destination });
        }
        if !map.is_walkable(destination) {
            return Err(MoveError::Blocked { destination });
        }
        if let Some(occupant) = state.entities.blocking_entity_at(destination) {
            return Err(MoveError::Occupied {
                destination,
                occupant: occupant.id,
            });
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        let origin = self.origin(state)?;
        let destination = self.direction.step(origin);
        state.entities.set_position(self.actor, destination);
        Ok((origin, destination))
    }

    fn post_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        // Exactly one blocker may stand on the destination: the mover.
        let position = self.origin(state)?;
        let blockers = state
            .entities
            .on_map()
            .filter(|(at, entity)| *at == position && entity.blocks_movement)
            .count();
        if blockers > 1 {
            return Err(MoveError::OccupancyDesync { position });
        }
        Ok(())
    }
}

/// Directional intent that attacks when a living actor stands in the way and
/// moves otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BumpAction {
    pub actor: EntityId,
    pub direction: CardinalDirection,
}

/// What a bump turns into once target presence is known.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BumpResolution {
    Move(MoveAction),
    Melee(super::MeleeAction),
}

impl BumpAction {
    pub fn new(actor: EntityId, direction: CardinalDirection) -> Self {
        Self { actor, direction }
    }

    /// Resolves against the current state. An unknown actor resolves to a
    /// move so the move's own validation reports it.
    pub fn resolve(&self, state: &GameState) -> BumpResolution {
        let target = state
            .entities
            .position(self.actor)
            .map(|origin| self.direction.step(origin))
            .and_then(|destination| state.entities.actor_at(destination));

        match target {
            Some(target) if target.id != self.actor => {
                BumpResolution::Melee(super::MeleeAction::new(self.actor, self.direction))
            }
            _ => BumpResolution::Move(MoveAction::new(self.actor, self.direction)),
        }
    }
}
