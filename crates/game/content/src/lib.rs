//! Data-driven content definitions and loaders.
//!
//! This crate houses static game content and provides loaders for data files:
//! - Entity catalog: actor and item templates (RON), plus a built-in default
//! - Scenarios: ASCII level layouts with a glyph legend (RON), or a seeded
//!   room-and-tunnel dungeon
//! - Game configuration (TOML)
//!
//! Content is consumed by the runtime to build the initial [`game_core::GameState`]
//! and map oracle; it never appears in game state itself.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{ActorTemplate, AiSpec, EntityCatalog, FighterSpec, ItemTemplate};

#[cfg(feature = "loaders")]
pub use loaders::{
    CatalogLoader, ConfigLoader, ContentFactory, DungeonGenerator, DungeonParams, LoadResult,
    Scenario, ScenarioLoader,
};
