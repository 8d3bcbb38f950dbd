use std::path::{Path, PathBuf};

use game_core::GameConfig;

use super::{
    CatalogLoader, ConfigLoader, DungeonGenerator, DungeonParams, LoadResult, Scenario,
    ScenarioLoader,
};
use crate::EntityCatalog;

/// Resolves content files relative to a data directory.
///
/// Layout:
/// ```text
/// data/
///   config.toml
///   catalog.ron
///   dungeon.toml
///   scenarios/<name>.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "config.toml";
    pub const CATALOG_FILE: &'static str = "catalog.ron";
    pub const DUNGEON_FILE: &'static str = "dungeon.toml";
    pub const SCENARIO_DIR: &'static str = "scenarios";

    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Data directory shipped alongside this crate.
    pub fn bundled() -> Self {
        Self::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Missing file falls back to [`GameConfig::default`].
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join(Self::CONFIG_FILE);
        if !path.exists() {
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Missing file falls back to [`EntityCatalog::builtin`].
    pub fn load_catalog(&self) -> LoadResult<EntityCatalog> {
        let path = self.data_dir.join(Self::CATALOG_FILE);
        if !path.exists() {
            return Ok(EntityCatalog::builtin());
        }
        CatalogLoader::load(&path)
    }

    /// Missing file falls back to [`DungeonParams::default`].
    pub fn load_dungeon_params(&self) -> LoadResult<DungeonParams> {
        let path = self.data_dir.join(Self::DUNGEON_FILE);
        if !path.exists() {
            return Ok(DungeonParams::default());
        }
        DungeonParams::load(&path)
    }

    pub fn load_scenario(&self, name: &str) -> LoadResult<Scenario> {
        ScenarioLoader::load(&self.scenario_path(name))
    }

    /// Resolves a scenario by name. `dungeon` is generated from `seed`;
    /// anything else is read from the scenarios directory.
    pub fn scenario(&self, name: &str, seed: u64) -> LoadResult<Scenario> {
        if name == DungeonGenerator::SCENARIO_NAME {
            let params = self.load_dungeon_params()?;
            return DungeonGenerator::new(&params, seed).generate();
        }
        self.load_scenario(name)
    }

    pub fn scenario_path(&self, name: &str) -> PathBuf {
        self.data_dir
            .join(Self::SCENARIO_DIR)
            .join(format!("{name}.ron"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/data");
        assert_eq!(factory.data_dir(), Path::new("/data"));
        assert_eq!(
            factory.scenario_path("tutorial"),
            Path::new("/data/scenarios/tutorial.ron")
        );
    }

    #[test]
    fn missing_files_fall_back_to_builtins() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());

        assert_eq!(factory.load_config().unwrap(), GameConfig::default());
        assert_eq!(factory.load_catalog().unwrap(), EntityCatalog::builtin());
        assert!(factory.load_scenario("tutorial").is_err());
        assert_eq!(factory.load_dungeon_params().unwrap(), DungeonParams::default());
    }

    #[test]
    fn bundled_dungeon_params_are_the_default() {
        let params = ContentFactory::bundled().load_dungeon_params().unwrap();
        assert_eq!(params, DungeonParams::default());
    }

    #[test]
    fn dungeon_scenarios_are_generated_from_the_seed() {
        let factory = ContentFactory::bundled();
        let first = factory.scenario("dungeon", 11).unwrap();
        let again = factory.scenario("dungeon", 11).unwrap();

        assert_eq!(first, again);
        assert_eq!(first.name, "dungeon");
        assert_eq!(factory.scenario("tutorial", 11).unwrap().name, "tutorial");
    }

    #[test]
    fn bundled_catalog_matches_builtin() {
        let catalog = ContentFactory::bundled().load_catalog().unwrap();
        assert_eq!(catalog, EntityCatalog::builtin());
    }

    #[test]
    fn bundled_config_is_the_default() {
        let config = ContentFactory::bundled().load_config().unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn bundled_tutorial_builds() {
        let factory = ContentFactory::bundled();
        let catalog = factory.load_catalog().unwrap();
        let config = factory.load_config().unwrap();
        let scenario = factory.load_scenario("tutorial").unwrap();

        let state = scenario.build_state(&catalog, 42, &config).unwrap();
        assert!(state.is_player_alive());
        assert!(state.entities.len() > 1);
    }
}
