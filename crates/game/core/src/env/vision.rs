use std::collections::BTreeSet;

use super::MapOracle;
use crate::state::{EntitiesState, Position};

/// Field-of-view collaborator.
///
/// The engine only reads the resulting visible set from
/// [`crate::state::WorldState`]; computing it is left to implementations.
pub trait FovOracle: Send + Sync {
    /// Tiles visible from `origin` within `radius`, origin included.
    fn compute(&self, map: &dyn MapOracle, origin: Position, radius: u32) -> BTreeSet<Position>;
}

/// Pathfinding collaborator used by hostile behavior.
pub trait PathOracle: Send + Sync {
    /// First tile of a walkable route from `from` towards `to`, or `None` if
    /// there is no route. Implementations may route around blocking entities.
    fn first_step_toward(
        &self,
        map: &dyn MapOracle,
        entities: &EntitiesState,
        from: Position,
        to: Position,
    ) -> Option<Position>;
}
