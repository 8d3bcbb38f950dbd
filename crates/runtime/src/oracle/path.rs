use game_core::{CardinalDirection, EntitiesState, MapOracle, PathOracle, Position};
use pathfinding::prelude::astar;
use strum::IntoEnumIterator;

const CARDINAL_COST: u32 = 2;
const DIAGONAL_COST: u32 = 3;

/// Eight-way A* over walkable tiles.
///
/// Tiles holding a blocking entity stay passable at a surcharge, so monsters
/// queue up behind each other in corridors instead of giving up, yet still
/// prefer to walk around a crowd when a free detour exists.
#[derive(Clone, Copy, Debug)]
pub struct AstarPathfinder {
    pub blocked_penalty: u32,
}

impl Default for AstarPathfinder {
    fn default() -> Self {
        Self {
            blocked_penalty: 10,
        }
    }
}

impl AstarPathfinder {
    /// Octile distance under the step costs above; never overestimates.
    fn heuristic(from: Position, to: Position) -> u32 {
        let dx = from.x.abs_diff(to.x);
        let dy = from.y.abs_diff(to.y);
        CARDINAL_COST * dx.max(dy) + (DIAGONAL_COST - CARDINAL_COST) * dx.min(dy)
    }

    fn neighbors(
        &self,
        map: &dyn MapOracle,
        entities: &EntitiesState,
        position: Position,
        goal: Position,
    ) -> Vec<(Position, u32)> {
        CardinalDirection::iter()
            .filter_map(|direction| {
                let next = direction.step(position);
                if !map.is_walkable(next) {
                    return None;
                }
                let (dx, dy) = direction.delta();
                let mut cost = if dx != 0 && dy != 0 {
                    DIAGONAL_COST
                } else {
                    CARDINAL_COST
                };
                if next != goal && entities.blocking_entity_at(next).is_some() {
                    cost += self.blocked_penalty;
                }
                Some((next, cost))
            })
            .collect()
    }
}

impl PathOracle for AstarPathfinder {
    fn first_step_toward(
        &self,
        map: &dyn MapOracle,
        entities: &EntitiesState,
        from: Position,
        to: Position,
    ) -> Option<Position> {
        if from == to {
            return None;
        }
        let (path, _cost) = astar(
            &from,
            |position| self.neighbors(map, entities, *position, to),
            |position| Self::heuristic(*position, to),
            |position| *position == to,
        )?;
        path.get(1).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::GridMap;
    use game_core::{
        ActorState, Ai, Blueprint, Fighter, MapDimensions, Rgb, StaticTile, TerrainKind,
    };

    fn map(rows: &[&str]) -> GridMap {
        let tiles = rows
            .iter()
            .flat_map(|row| row.chars())
            .map(|glyph| {
                StaticTile::new(if glyph == '#' {
                    TerrainKind::Wall
                } else {
                    TerrainKind::Floor
                })
            })
            .collect();
        GridMap::new(
            MapDimensions::new(rows[0].len() as u32, rows.len() as u32),
            tiles,
        )
    }

    fn blocker() -> Blueprint {
        let actor = ActorState::new(Fighter::new(10, 0, 3), 0, Ai::Hostile);
        Blueprint::actor("Orc", 'o', Rgb::WHITE, actor)
    }

    #[test]
    fn walks_around_walls() {
        let map = map(&[
            "#####", //
            "#...#",
            "#.#.#",
            "#...#",
            "#####",
        ]);
        let entities = EntitiesState::new();

        let step = AstarPathfinder::default().first_step_toward(
            &map,
            &entities,
            Position::new(2, 1),
            Position::new(2, 3),
        );
        assert!(matches!(step, Some(p) if p == Position::new(1, 2) || p == Position::new(3, 2)));
    }

    #[test]
    fn prefers_a_detour_around_blockers() {
        let map = map(&[
            "#######", //
            "#.....#",
            "#.....#",
            "#######",
        ]);
        let mut entities = EntitiesState::new();
        entities.spawn(blocker(), Position::new(2, 1));

        let step = AstarPathfinder::default().first_step_toward(
            &map,
            &entities,
            Position::new(1, 1),
            Position::new(5, 1),
        );
        assert_eq!(step, Some(Position::new(2, 2)));
    }

    #[test]
    fn unreachable_goal_has_no_step() {
        let map = map(&["#.#.#"]);
        let entities = EntitiesState::new();

        let step = AstarPathfinder::default().first_step_toward(
            &map,
            &entities,
            Position::new(1, 0),
            Position::new(3, 0),
        );
        assert_eq!(step, None);
    }
}
