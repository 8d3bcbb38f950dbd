//! Static dungeon layout served through [`game_core::MapOracle`].
use game_content::Scenario;
use game_core::{MapDimensions, MapOracle, Position, StaticTile, TerrainKind};

/// Row-major tile grid.
///
/// Holds immutable map structure that doesn't change during gameplay.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GridMap {
    dimensions: MapDimensions,
    tiles: Vec<StaticTile>,
}

impl GridMap {
    /// Missing trailing tiles read as walls.
    pub fn new(dimensions: MapDimensions, mut tiles: Vec<StaticTile>) -> Self {
        let area = dimensions.width as usize * dimensions.height as usize;
        tiles.resize(area, StaticTile::new(TerrainKind::Wall));
        Self { dimensions, tiles }
    }

    /// Floor everywhere.
    pub fn open(width: u32, height: u32) -> Self {
        let area = width as usize * height as usize;
        Self::new(
            MapDimensions::new(width, height),
            vec![StaticTile::new(TerrainKind::Floor); area],
        )
    }

    pub fn from_scenario(scenario: &Scenario) -> Self {
        Self::new(scenario.dimensions, scenario.tiles.clone())
    }
}

impl MapOracle for GridMap {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn tile(&self, position: Position) -> Option<StaticTile> {
        self.dimensions
            .index(position)
            .and_then(|index| self.tiles.get(index).copied())
    }
}
