use crate::state::Position;

/// One of the eight compass directions on the grid (`y` grows south).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CardinalDirection {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl CardinalDirection {
    pub fn delta(self) -> (i32, i32) {
        match self {
            CardinalDirection::North => (0, -1),
            CardinalDirection::South => (0, 1),
            CardinalDirection::East => (1, 0),
            CardinalDirection::West => (-1, 0),
            CardinalDirection::NorthEast => (1, -1),
            CardinalDirection::NorthWest => (-1, -1),
            CardinalDirection::SouthEast => (1, 1),
            CardinalDirection::SouthWest => (-1, 1),
        }
    }

    /// Direction for a unit step `(dx, dy)`. `None` for `(0, 0)` or longer steps.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        use CardinalDirection::*;
        Some(match (dx, dy) {
            (0, -1) => North,
            (0, 1) => South,
            (1, 0) => East,
            (-1, 0) => West,
            (1, -1) => NorthEast,
            (-1, -1) => NorthWest,
            (1, 1) => SouthEast,
            (-1, 1) => SouthWest,
            _ => return None,
        })
    }

    /// Direction of the first step from `from` towards `to`.
    pub fn toward(from: Position, to: Position) -> Option<Self> {
        Self::from_delta((to.x - from.x).signum(), (to.y - from.y).signum())
    }

    pub fn step(self, from: Position) -> Position {
        let (dx, dy) = self.delta();
        from.offset(dx, dy)
    }
}
