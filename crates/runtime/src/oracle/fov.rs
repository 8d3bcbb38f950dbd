use std::collections::BTreeSet;

use game_core::{FovOracle, MapOracle, Position};

/// Field of view by ray casting.
///
/// A tile inside the radius is visible when the Bresenham line from the
/// origin reaches it without passing through an opaque tile. Opaque tiles
/// themselves can be seen, so walls bounding a room are lit.
#[derive(Clone, Copy, Debug, Default)]
pub struct LineOfSightFov;

impl LineOfSightFov {
    fn has_line_of_sight(map: &dyn MapOracle, from: Position, to: Position) -> bool {
        let line = bresenham(from, to);
        // Only the tiles strictly between the ends can occlude.
        line.iter()
            .skip(1)
            .take(line.len().saturating_sub(2))
            .all(|position| map.is_transparent(*position))
    }
}

impl FovOracle for LineOfSightFov {
    fn compute(&self, map: &dyn MapOracle, origin: Position, radius: u32) -> BTreeSet<Position> {
        let mut visible = BTreeSet::new();
        if !map.in_bounds(origin) {
            return visible;
        }

        let r = radius as i32;
        for dy in -r..=r {
            for dx in -r..=r {
                let target = origin.offset(dx, dy);
                if !map.in_bounds(target) || origin.distance(target) > f64::from(radius) {
                    continue;
                }
                if Self::has_line_of_sight(map, origin, target) {
                    visible.insert(target);
                }
            }
        }
        visible
    }
}

/// Grid cells on the line from `from` to `to`, both ends included.
pub(crate) fn bresenham(from: Position, to: Position) -> Vec<Position> {
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };

    let mut error = dx + dy;
    let mut current = from;
    let mut line = vec![current];
    while current != to {
        let doubled = 2 * error;
        if doubled >= dy {
            error += dy;
            current.x += sx;
        }
        if doubled <= dx {
            error += dx;
            current.y += sy;
        }
        line.push(current);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::GridMap;
    use game_core::{MapDimensions, StaticTile, TerrainKind};

    fn map_with_wall(width: u32, height: u32, wall: Position) -> GridMap {
        let tiles = (0..height as i32)
            .flat_map(|y| (0..width as i32).map(move |x| Position::new(x, y)))
            .map(|position| {
                let terrain = if position == wall {
                    TerrainKind::Wall
                } else {
                    TerrainKind::Floor
                };
                StaticTile::new(terrain)
            })
            .collect();
        GridMap::new(MapDimensions::new(width, height), tiles)
    }

    #[test]
    fn bresenham_covers_both_ends() {
        let line = bresenham(Position::new(0, 0), Position::new(3, 1));
        assert_eq!(line.first(), Some(&Position::new(0, 0)));
        assert_eq!(line.last(), Some(&Position::new(3, 1)));
        assert_eq!(line.len(), 4);
    }

    #[test]
    fn walls_are_seen_but_hide_what_is_behind() {
        let map = map_with_wall(9, 3, Position::new(4, 1));
        let visible = LineOfSightFov.compute(&map, Position::new(1, 1), 8);

        assert!(visible.contains(&Position::new(1, 1)));
        assert!(visible.contains(&Position::new(4, 1)));
        assert!(!visible.contains(&Position::new(6, 1)));
    }

    #[test]
    fn radius_limits_sight() {
        let map = GridMap::open(20, 1);
        let visible = LineOfSightFov.compute(&map, Position::new(0, 0), 5);

        assert!(visible.contains(&Position::new(5, 0)));
        assert!(!visible.contains(&Position::new(6, 0)));
    }
}
