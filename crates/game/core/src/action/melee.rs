use crate::action::{ActionTransition, CardinalDirection};
use crate::combat::{self, AttackOutcome};
use crate::env::GameEnv;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, GameState, Position};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MeleeError {
    #[error("Nothing to attack.")]
    NoTarget { destination: Position },

    #[error("actor {0} not found on the map")]
    ActorNotFound(EntityId),
}

impl GameError for MeleeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            MeleeError::NoTarget { .. } => ErrorSeverity::Impossible,
            MeleeError::ActorNotFound(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            MeleeError::NoTarget { .. } => "MELEE_NO_TARGET",
            MeleeError::ActorNotFound(_) => "MELEE_ACTOR_NOT_FOUND",
        }
    }
}

/// Attack whatever living actor stands in the adjacent tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeleeAction {
    pub actor: EntityId,
    pub direction: CardinalDirection,
}

impl MeleeAction {
    pub fn new(actor: EntityId, direction: CardinalDirection) -> Self {
        Self { actor, direction }
    }

    fn target(&self, state: &GameState) -> Result<EntityId, MeleeError> {
        let origin = state
            .entities
            .position(self.actor)
            .ok_or(MeleeError::ActorNotFound(self.actor))?;
        let destination = self.direction.step(origin);
        state
            .entities
            .actor_at(destination)
            .map(|target| target.id)
            .filter(|target| *target != self.actor)
            .ok_or(MeleeError::NoTarget { destination })
    }
}

impl ActionTransition for MeleeAction {
    type Error = MeleeError;
    type Result = AttackOutcome;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        self.target(state).map(|_| ())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        let target = self.target(state)?;
        let power = combat::effective_power(&state.entities, self.actor)
            .ok_or(MeleeError::ActorNotFound(self.actor))?;
        let defense = combat::effective_defense(&state.entities, target)
            .ok_or(MeleeError::ActorNotFound(target))?;
        let damage = combat::melee_damage(power, defense);

        state
            .entities
            .actor_mut(target)
            .ok_or(MeleeError::ActorNotFound(target))?
            .fighter
            .take_damage(damage);

        Ok(AttackOutcome {
            attacker: self.actor,
            target,
            damage,
        })
    }
}
