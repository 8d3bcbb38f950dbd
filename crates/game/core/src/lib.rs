//! Deterministic turn-based roguelike rules shared by the runtime and tools.
//!
//! `game-core` defines the canonical rules (turn queue, actions, combat, AI,
//! world state) and exposes pure APIs with no I/O. All state mutation flows
//! through [`engine::GameEngine`], and supporting crates depend on the types
//! re-exported here.
pub mod action;
pub mod ai;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use action::{
    Action, ActionKind, ActionResult, ActionTransition, BumpAction, CardinalDirection,
    ConsumeAction, ConsumeError, Consumed, DropAction, DropError, EquipAction, EquipChange,
    EquipError, ItemEffect, MeleeAction, MeleeError, MoveAction, MoveError, PickupAction,
    PickupError, WaitAction,
};
pub use ai::{AiError, take_turn};
pub use combat::{AttackOutcome, Death};
pub use config::{GameConfig, RejectedMovePolicy};
pub use engine::{ActionOutcome, ExecuteError, GameEngine, TransitionPhase, TransitionPhaseError};
pub use env::{
    Env, FovOracle, GameEnv, MapDimensions, MapOracle, OracleError, PathOracle, PcgRng,
    RngOracle, StaticTile, TerrainKind, compute_seed,
};
pub use error::{ErrorSeverity, GameError, NeverError};
pub use state::{
    ActorState, Ai, Blueprint, Consumable, EntitiesState, Entity, EntityId, EntityKind,
    EquipSlot, Equipment, Equippable, Fighter, GameState, InventoryError, InventoryState,
    ItemState, NORMAL_SPEED, Placement, Position, RenderOrder, Rgb, Tick, Ticket, TurnError,
    TurnQueue, TurnState, WorldState,
};
