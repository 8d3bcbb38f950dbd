//! Unified error type surfaced by the session API.
//!
//! `Impossible` action failures never reach this type; the session turns them
//! into log lines. Everything here means the simulation cannot continue.
use game_core::{AiError, EntityId, ExecuteError, TurnError};
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("player entity {0} is not a living actor")]
    NoPlayer(EntityId),

    #[error("player at {position} stands outside the {width}x{height} map")]
    PlayerOffMap {
        position: game_core::Position,
        width: u32,
        height: u32,
    },

    #[error("turn scheduling failed")]
    Turn(#[from] TurnError),

    #[error("action execution failed")]
    Execute(#[source] ExecuteError),

    #[error("behavior of {actor} failed")]
    Ai {
        actor: EntityId,
        #[source]
        source: AiError,
    },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
