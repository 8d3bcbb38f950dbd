//! Scenario loader: ASCII level layouts plus a glyph legend.
//!
//! `#` is a wall, `.` is floor and `@` marks the player spawn. Any other
//! glyph must appear in the legend and places the named catalog entry on a
//! floor tile.

use std::collections::BTreeMap;
use std::path::Path;

use game_core::{
    EntitiesState, GameConfig, GameState, MapDimensions, Position, StaticTile, TerrainKind,
};

use super::{LoadResult, read_file};
use crate::EntityCatalog;

const WALL: char = '#';
const FLOOR: char = '.';
const PLAYER: char = '@';

/// On-disk scenario layout.
#[derive(Debug, Clone, serde::Deserialize)]
struct ScenarioRon {
    name: String,
    #[serde(default)]
    legend: BTreeMap<char, String>,
    rows: Vec<String>,
}

/// A parsed level: static tiles plus where everything starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scenario {
    pub name: String,
    pub dimensions: MapDimensions,
    /// Row-major, `width * height` entries.
    pub tiles: Vec<StaticTile>,
    pub player_spawn: Position,
    /// Catalog ids placed at level start, in reading order.
    pub placements: Vec<(Position, String)>,
}

impl Scenario {
    pub fn tile(&self, position: Position) -> Option<StaticTile> {
        self.dimensions
            .index(position)
            .and_then(|index| self.tiles.get(index).copied())
    }

    /// Spawns the player first, then every placement in reading order.
    pub fn build_state(
        &self,
        catalog: &EntityCatalog,
        seed: u64,
        config: &GameConfig,
    ) -> LoadResult<GameState> {
        let player_blueprint = catalog
            .blueprint(EntityCatalog::PLAYER, config)
            .ok_or_else(|| anyhow::anyhow!("Catalog is missing the `player` actor"))?;

        let mut entities = EntitiesState::new();
        let player = entities.spawn(player_blueprint, self.player_spawn);

        for (position, id) in &self.placements {
            let blueprint = catalog.blueprint(id, config).ok_or_else(|| {
                anyhow::anyhow!("Scenario `{}` places unknown entity `{}`", self.name, id)
            })?;
            entities.spawn(blueprint, *position);
        }

        Ok(GameState::new(seed, entities, player))
    }
}

/// Loader for [`Scenario`] from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Scenario> {
        let data: ScenarioRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))?;
        Self::build(data)
    }

    fn build(data: ScenarioRon) -> LoadResult<Scenario> {
        let width = data.rows.first().map_or(0, |row| row.chars().count());
        if width == 0 {
            anyhow::bail!("Scenario `{}` has no tiles", data.name);
        }

        let mut tiles = Vec::with_capacity(width * data.rows.len());
        let mut player_spawn = None;
        let mut placements = Vec::new();

        for (y, row) in data.rows.iter().enumerate() {
            if row.chars().count() != width {
                anyhow::bail!(
                    "Scenario `{}` row {} has width {}, expected {}",
                    data.name,
                    y,
                    row.chars().count(),
                    width
                );
            }

            for (x, glyph) in row.chars().enumerate() {
                let position = Position::new(x as i32, y as i32);
                let terrain = match glyph {
                    WALL => TerrainKind::Wall,
                    FLOOR => TerrainKind::Floor,
                    PLAYER => {
                        if player_spawn.replace(position).is_some() {
                            anyhow::bail!("Scenario `{}` has more than one player", data.name);
                        }
                        TerrainKind::Floor
                    }
                    other => {
                        let id = data.legend.get(&other).ok_or_else(|| {
                            anyhow::anyhow!(
                                "Scenario `{}` uses glyph '{}' at {} with no legend entry",
                                data.name,
                                other,
                                position
                            )
                        })?;
                        placements.push((position, id.clone()));
                        TerrainKind::Floor
                    }
                };
                tiles.push(StaticTile::new(terrain));
            }
        }

        let player_spawn = player_spawn
            .ok_or_else(|| anyhow::anyhow!("Scenario `{}` has no player spawn", data.name))?;

        Ok(Scenario {
            name: data.name,
            dimensions: MapDimensions::new(width as u32, data.rows.len() as u32),
            tiles,
            player_spawn,
            placements,
        })
    }
}
