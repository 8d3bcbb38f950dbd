//! Game configuration loader.

use std::path::Path;

use game_core::GameConfig;

use super::{LoadResult, read_file};

/// Loader for [`GameConfig`] from TOML files.
///
/// Missing keys keep their defaults, so an empty file yields
/// [`GameConfig::default`].
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        Self::validate(&config)?;
        Ok(config)
    }

    fn validate(config: &GameConfig) -> LoadResult<()> {
        anyhow::ensure!(
            (1..=GameConfig::MAX_TURN_COST).contains(&config.turn_cost),
            "turn_cost must be between 1 and {}, got {}",
            GameConfig::MAX_TURN_COST,
            config.turn_cost
        );
        Ok(())
    }
}
