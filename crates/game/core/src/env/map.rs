use crate::state::Position;

/// Static map oracle exposing the immutable tile layout.
///
/// Occupancy is not part of the map; it is answered by the entity arena.
pub trait MapOracle: Send + Sync {
    fn dimensions(&self) -> MapDimensions;

    /// Tile at `position`, or `None` outside the map.
    fn tile(&self, position: Position) -> Option<StaticTile>;

    fn in_bounds(&self, position: Position) -> bool {
        self.dimensions().contains(position)
    }

    /// Out-of-bounds tiles are never walkable.
    fn is_walkable(&self, position: Position) -> bool {
        self.tile(position).is_some_and(StaticTile::is_walkable)
    }

    fn is_transparent(&self, position: Position) -> bool {
        self.tile(position).is_some_and(StaticTile::is_transparent)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && i64::from(position.x) < i64::from(self.width)
            && i64::from(position.y) < i64::from(self.height)
    }

    /// Row-major index of an in-bounds position.
    pub fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.y as usize * self.width as usize + position.x as usize)
    }
}

/// Immutable descriptor for a tile in the static layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticTile {
    terrain: TerrainKind,
}

impl StaticTile {
    pub const fn new(terrain: TerrainKind) -> Self {
        Self { terrain }
    }

    pub fn terrain(self) -> TerrainKind {
        self.terrain
    }

    pub fn is_walkable(self) -> bool {
        self.terrain.is_walkable()
    }

    pub fn is_transparent(self) -> bool {
        self.terrain.is_transparent()
    }
}

/// Canonical terrain classes for static map tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TerrainKind {
    Floor,
    Wall,
}

impl TerrainKind {
    pub fn is_walkable(self) -> bool {
        matches!(self, TerrainKind::Floor)
    }

    pub fn is_transparent(self) -> bool {
        matches!(self, TerrainKind::Floor)
    }
}
