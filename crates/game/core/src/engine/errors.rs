//! Error types for the action execution pipeline.

use crate::action::{
    ActionTransition, ConsumeAction, DropAction, EquipAction, MeleeAction, MoveAction,
    PickupAction, WaitAction,
};
use crate::error::{ErrorSeverity, GameError};
use crate::state::EntityId;

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
///
/// Displays as the inner error alone, so an `Impossible` error reads as the
/// line shown to the player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.error.fmt(f)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

impl<E: GameError> GameError for TransitionPhaseError<E> {
    fn severity(&self) -> ErrorSeverity {
        // Only a rejected precondition leaves the world untouched.
        match (self.phase, self.error.severity()) {
            (TransitionPhase::PreValidate, severity) => severity,
            (_, ErrorSeverity::Impossible) => ErrorSeverity::Internal,
            (_, severity) => severity,
        }
    }

    fn error_code(&self) -> &'static str {
        self.error.error_code()
    }
}

type PhaseError<T> = TransitionPhaseError<<T as ActionTransition>::Error>;

/// Errors surfaced while executing an action through the game engine.
#[derive(Clone, Debug, thiserror::Error)]
pub enum ExecuteError {
    #[error(transparent)]
    Move(PhaseError<MoveAction>),

    #[error(transparent)]
    Melee(PhaseError<MeleeAction>),

    #[error(transparent)]
    Wait(PhaseError<WaitAction>),

    #[error(transparent)]
    Pickup(PhaseError<PickupAction>),

    #[error(transparent)]
    Consume(PhaseError<ConsumeAction>),

    #[error(transparent)]
    Drop(PhaseError<DropAction>),

    #[error(transparent)]
    Equip(PhaseError<EquipAction>),

    #[error("action actor {actor} is not the current actor ({current:?})")]
    ActorNotCurrent {
        actor: EntityId,
        current: Option<EntityId>,
    },

    #[error("actor {0} is dead or missing and cannot act")]
    ActorNotAlive(EntityId),
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ExecuteError::Move(error) => error.severity(),
            ExecuteError::Melee(error) => error.severity(),
            ExecuteError::Wait(error) => error.severity(),
            ExecuteError::Pickup(error) => error.severity(),
            ExecuteError::Consume(error) => error.severity(),
            ExecuteError::Drop(error) => error.severity(),
            ExecuteError::Equip(error) => error.severity(),
            ExecuteError::ActorNotCurrent { .. } | ExecuteError::ActorNotAlive(_) => {
                ErrorSeverity::Internal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ExecuteError::Move(error) => error.error_code(),
            ExecuteError::Melee(error) => error.error_code(),
            ExecuteError::Wait(error) => error.error_code(),
            ExecuteError::Pickup(error) => error.error_code(),
            ExecuteError::Consume(error) => error.error_code(),
            ExecuteError::Drop(error) => error.error_code(),
            ExecuteError::Equip(error) => error.error_code(),
            ExecuteError::ActorNotCurrent { .. } => "EXECUTE_ACTOR_NOT_CURRENT",
            ExecuteError::ActorNotAlive(_) => "EXECUTE_ACTOR_NOT_ALIVE",
        }
    }
}

impl ExecuteError {
    /// True for an expected, world-preserving rejection.
    pub fn is_impossible(&self) -> bool {
        self.severity().is_impossible()
    }
}
