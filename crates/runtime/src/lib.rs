//! Runtime orchestration for the deterministic game simulation.
//!
//! This crate wires `game-core` rules to concrete oracles, a message log and
//! save storage. Consumers hold a [`Session`] and feed it [`Command`]s; the
//! session resolves the player's action and every other actor's turn until
//! input is needed again.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the resolution loop and command binding
//! - [`events`] and [`messages`] describe what happened, for logs and renderers
//! - [`oracle`] provides the map, field of view and pathfinding collaborators
//! - [`repository`] persists complete sessions
pub mod error;
pub mod events;
pub mod messages;
pub mod oracle;
pub mod repository;
pub mod session;

pub use error::{Result, RuntimeError};
pub use events::GameEvent;
pub use messages::{Message, MessageLevel, MessageLog};
pub use oracle::{AstarPathfinder, GridMap, LineOfSightFov, OracleManager};
pub use repository::{
    FileStateRepository, InMemoryStateRepo, RepositoryError, SaveGame, StateRepository,
};
pub use session::{Command, InteractionMode, Session, Submission};
