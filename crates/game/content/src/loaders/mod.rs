//! Content loaders for data files.
//!
//! Catalogs and scenarios are RON; configuration and dungeon generation
//! parameters are TOML. Every loader returns [`LoadResult`] so callers can
//! attach their own context.

pub mod catalog;
pub mod config;
pub mod dungeon;
pub mod factory;
pub mod scenario;

pub use catalog::CatalogLoader;
pub use config::ConfigLoader;
pub use dungeon::{DungeonGenerator, DungeonParams};
pub use factory::ContentFactory;
pub use scenario::{Scenario, ScenarioLoader};

use std::path::Path;

/// Result type for content loading operations.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper to read a file to string.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
