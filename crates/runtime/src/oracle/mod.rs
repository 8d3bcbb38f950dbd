//! Concrete collaborators behind the `game-core` oracle traits.
//!
//! These implementations bundle into an [`OracleManager`] so the session can
//! build [`game_core::GameEnv`] snapshots on demand. The map is immutable for
//! the life of a level; dynamic state lives in [`game_core::GameState`].
mod fov;
mod map;
mod path;

use std::collections::BTreeSet;
use std::sync::Arc;

use game_core::{Env, FovOracle, GameEnv, PcgRng, Position};

pub use fov::LineOfSightFov;
pub use map::GridMap;
pub use path::AstarPathfinder;

/// Owns every oracle the engine and behaviors consult.
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) map: Arc<GridMap>,
    pub(crate) fov: LineOfSightFov,
    pub(crate) path: AstarPathfinder,
    pub(crate) rng: PcgRng,
}

impl OracleManager {
    pub fn new(map: Arc<GridMap>) -> Self {
        Self {
            map,
            fov: LineOfSightFov,
            path: AstarPathfinder::default(),
            rng: PcgRng, // PcgRng is stateless
        }
    }

    /// Converts oracle manager into GameEnv for game-core
    pub fn as_game_env(&self) -> GameEnv<'_> {
        Env::with_all(self.map.as_ref(), &self.fov, &self.path, &self.rng).into_game_env()
    }

    pub fn map(&self) -> &GridMap {
        &self.map
    }

    pub fn visible_from(&self, origin: Position, radius: u32) -> BTreeSet<Position> {
        self.fov.compute(self.map.as_ref(), origin, radius)
    }
}
